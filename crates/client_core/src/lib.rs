use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{AnalysisEnvelope, AnalysisRequest, ANALYZE_PATH, HEALTH_PATH};
use tracing::{debug, warn};
use url::Url;

pub mod controller;
pub mod error;
pub mod renderer;
pub mod view;

pub use controller::{
    ControllerOptions, FormValues, PendingSubmission, Rendered, SubmissionController, Transition,
};
pub use error::{SubmitError, TransportError, ValidationError};
pub use view::{FortuneDisplay, Notice, NoticeKind, ResultSlot, ScrollBehavior, ViewState};

/// Remote scoring service behind `/analyze`.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisEnvelope, TransportError>;
}

pub struct HttpScorer {
    http: Client,
    analyze_url: Url,
    health_url: Url,
}

impl HttpScorer {
    pub fn new(scorer_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), scorer_url)
    }

    pub fn with_client(http: Client, scorer_url: &str) -> Result<Self, TransportError> {
        let endpoint_error = |reason: String| TransportError::Endpoint {
            url: scorer_url.to_string(),
            reason,
        };
        let base = Url::parse(scorer_url).map_err(|e| endpoint_error(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(endpoint_error("not a base url".to_string()));
        }
        let analyze_url = base
            .join(ANALYZE_PATH)
            .map_err(|e| endpoint_error(e.to_string()))?;
        let health_url = base
            .join(HEALTH_PATH)
            .map_err(|e| endpoint_error(e.to_string()))?;

        Ok(Self {
            http,
            analyze_url,
            health_url,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    /// `GET /healthz`; true when the scorer answers `ok`.
    pub async fn health_check(&self) -> Result<bool, TransportError> {
        let res = self.http.get(self.health_url.clone()).send().await?;
        if !res.status().is_success() {
            return Err(TransportError::Status {
                status: res.status().as_u16(),
            });
        }
        let body = res.text().await?;
        Ok(body.trim() == "ok")
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisEnvelope, TransportError> {
        let res = self
            .http
            .post(self.analyze_url.clone())
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "scorer returned non-success status");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = res.bytes().await?;
        let envelope: AnalysisEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!(has_error = envelope.error.is_some(), "decoded analysis payload");
        Ok(envelope)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
