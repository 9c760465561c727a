//! Submission controller: form validation, busy/idle transitions, dispatch to the scorer.

use std::{
    mem,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{
    domain::{Gender, Source},
    error::SemanticError,
    protocol::{AnalysisEnvelope, AnalysisRequest, AnalysisResponse},
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{SubmitError, TransportError, ValidationError},
    renderer::render,
    view::{Notice, NoticeKind, ViewState, PROGRESS_LABEL},
    Scorer,
};

/// Raw form input as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub last_name: String,
    pub first_name: String,
    pub gender: Gender,
}

impl FormValues {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            gender,
        }
    }

    pub fn to_request(&self) -> Result<AnalysisRequest, ValidationError> {
        let last_name = self.last_name.trim();
        let first_name = self.first_name.trim();
        if last_name.is_empty() || first_name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(AnalysisRequest {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            gender: self.gender,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// `None` waits for the scorer indefinitely.
    pub request_timeout: Option<Duration>,
    pub preferred_source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Section that was rendered when the scorer answered per source.
    pub source: Option<Source>,
}

/// The view after a submission step, together with how the step ended.
#[derive(Debug)]
pub struct Transition<T> {
    pub view: ViewState,
    pub outcome: Result<T, SubmitError>,
}

#[derive(Debug)]
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A validated submission holding the in-flight slot until it is finished or dropped.
#[derive(Debug)]
pub struct PendingSubmission {
    request: AnalysisRequest,
    idle_label: String,
    _guard: InFlightGuard,
}

impl PendingSubmission {
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

pub struct SubmissionController {
    scorer: Arc<dyn Scorer>,
    options: ControllerOptions,
    in_flight: Arc<AtomicBool>,
}

impl SubmissionController {
    pub fn new(scorer: Arc<dyn Scorer>, options: ControllerOptions) -> Self {
        Self {
            scorer,
            options,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates the form and moves the view to the busy state.
    ///
    /// Fails without touching the network when a name is blank or another
    /// submission still holds the in-flight slot.
    pub fn begin(&self, mut view: ViewState, form: &FormValues) -> Transition<PendingSubmission> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                view.notice = Some(Notice::new(NoticeKind::Validation, err.to_string()));
                return Transition {
                    view,
                    outcome: Err(err.into()),
                };
            }
        };

        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("submission rejected: previous request still in flight");
            return Transition {
                view,
                outcome: Err(SubmitError::Busy),
            };
        };

        view.submit.enabled = false;
        let idle_label = mem::replace(&mut view.submit.label, PROGRESS_LABEL.to_string());
        view.result_visible = false;
        view.pending_scroll = None;
        view.notice = None;

        Transition {
            view,
            outcome: Ok(PendingSubmission {
                request,
                idle_label,
                _guard: guard,
            }),
        }
    }

    pub async fn dispatch(
        &self,
        pending: &PendingSubmission,
    ) -> Result<AnalysisEnvelope, TransportError> {
        debug!(
            last_name = %pending.request.last_name,
            first_name = %pending.request.first_name,
            gender = pending.request.gender.wire_value(),
            "dispatching analysis request"
        );
        let call = self.scorer.analyze(&pending.request);
        match self.options.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(TransportError::Timeout(limit))),
            None => call.await,
        }
    }

    /// Restores the idle state and applies the scorer's answer to the view.
    pub fn finish(
        &self,
        mut view: ViewState,
        pending: PendingSubmission,
        answer: Result<AnalysisEnvelope, TransportError>,
    ) -> Transition<Rendered> {
        view.submit.enabled = true;
        view.submit.label = pending.idle_label;

        let mut envelope = match answer {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(error = %err, "analysis request failed");
                view.notice = Some(Notice::new(NoticeKind::Transport, err.to_string()));
                return Transition {
                    view,
                    outcome: Err(err.into()),
                };
            }
        };

        if let Some(payload) = envelope.error.take() {
            info!(
                error = %payload.error,
                code = payload.error_code.as_deref().unwrap_or("-"),
                reported_at = ?payload.reported_at(),
                "scorer reported an error"
            );
            let err = SemanticError::from(payload);
            view.notice = Some(Notice::new(NoticeKind::Semantic, err.message.clone()));
            return Transition {
                view,
                outcome: Err(err.into()),
            };
        }

        let empty = AnalysisResponse::default();
        let (source, response) = envelope
            .select(self.options.preferred_source)
            .unwrap_or((None, &empty));
        let request = &pending.request;
        let view = render(
            view,
            &request.last_name,
            &request.first_name,
            request.gender,
            response,
        );

        Transition {
            view,
            outcome: Ok(Rendered { source }),
        }
    }

    /// Full submission: validate, go busy, call the scorer, return to idle and render.
    pub async fn on_submit(&self, view: ViewState, form: &FormValues) -> Transition<Rendered> {
        let Transition { view, outcome } = self.begin(view, form);
        let pending = match outcome {
            Ok(pending) => pending,
            Err(err) => {
                return Transition {
                    view,
                    outcome: Err(err),
                }
            }
        };

        let answer = self.dispatch(&pending).await;
        self.finish(view, pending, answer)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
