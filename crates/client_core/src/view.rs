//! Explicit UI state owned by the caller and threaded through the controller and renderer.

use std::collections::BTreeMap;

use shared::domain::{FortuneStyle, SlotId};

pub const DEFAULT_SUBMIT_LABEL: &str = "鑑定する";
pub const PROGRESS_LABEL: &str = "取得中...";
pub const CONFIGURATION_VALUE_PREFIX: &str = "配置: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: DEFAULT_SUBMIT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneDisplay {
    pub text: String,
    pub style: Option<FortuneStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSlot {
    pub value: Option<String>,
    pub fortune: Option<FortuneDisplay>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Transport,
    Semantic,
}

/// Blocking user notification raised by a failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn alert_text(&self) -> String {
        match self.kind {
            NoticeKind::Validation => self.message.clone(),
            NoticeKind::Transport => format!("エラーが発生しました: {}", self.message),
            NoticeKind::Semantic => format!("エラー: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub submit: SubmitControl,
    pub result_visible: bool,
    pub heading: Option<String>,
    pub pending_scroll: Option<ScrollBehavior>,
    pub notice: Option<Notice>,
    slots: BTreeMap<SlotId, ResultSlot>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_slots(SlotId::ALL)
    }
}

impl ViewState {
    /// A view whose page only provides the given result slots.
    pub fn with_slots(slots: impl IntoIterator<Item = SlotId>) -> Self {
        Self {
            submit: SubmitControl::default(),
            result_visible: false,
            heading: None,
            pending_scroll: None,
            notice: None,
            slots: slots
                .into_iter()
                .map(|id| (id, ResultSlot::default()))
                .collect(),
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.submit.enabled
    }

    pub fn slot(&self, id: SlotId) -> Option<&ResultSlot> {
        self.slots.get(&id)
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut ResultSlot> {
        self.slots.get_mut(&id)
    }

    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &ResultSlot)> {
        self.slots.iter().map(|(id, slot)| (*id, slot))
    }

    pub fn clear_descriptions(&mut self) {
        for slot in self.slots.values_mut() {
            slot.description = None;
        }
    }

    pub fn description_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.description.is_some())
            .count()
    }
}
