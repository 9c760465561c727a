//! Projects a decoded analysis onto the result slots of a [`ViewState`].

use shared::{
    domain::{Category, Fortune, Gender, Kaku, SlotId},
    protocol::{AnalysisResponse, FortuneLabel},
};
use tracing::debug;

use crate::view::{FortuneDisplay, ScrollBehavior, ViewState, CONFIGURATION_VALUE_PREFIX};

pub fn result_heading(last_name: &str, first_name: &str, gender: Gender) -> String {
    format!(
        "{last_name}{first_name}さん（{}）の姓名判断結果",
        gender.display_label()
    )
}

/// Sets the fortune text and replaces any severity marker with the one for `label`.
///
/// Unrecognized labels leave the element unstyled.
pub fn set_fortune_class(slot_fortune: &mut Option<FortuneDisplay>, label: &FortuneLabel) {
    let display = slot_fortune.get_or_insert_with(|| FortuneDisplay {
        text: String::new(),
        style: None,
    });
    display.text.clone_from(&label.text);
    display.style = label.fortune.map(Fortune::style);
}

/// Best effort: categories missing from `response` or slots missing from `view` are skipped.
pub fn render(
    mut view: ViewState,
    last_name: &str,
    first_name: &str,
    gender: Gender,
    response: &AnalysisResponse,
) -> ViewState {
    view.heading = Some(result_heading(last_name, first_name, gender));
    view.clear_descriptions();

    for kaku in Kaku::ALL {
        let Some(reading) = response.reading(*kaku) else {
            continue;
        };
        let Some(slot) = view.slot_mut(kaku.slot_id()) else {
            debug!(category = kaku.label(), "result slot missing; skipping");
            continue;
        };
        set_fortune_class(&mut slot.fortune, &reading.fortune);
        if let Some(description) = &reading.description {
            slot.description = Some(description.clone());
        }
    }

    if let Some(configuration) = &response.configuration {
        match view.slot_mut(SlotId::Sansai) {
            Some(slot) => {
                if let Some(value) = &configuration.value {
                    slot.value = Some(format!("{CONFIGURATION_VALUE_PREFIX}{value}"));
                }
                if let Some(label) = &configuration.fortune {
                    set_fortune_class(&mut slot.fortune, label);
                }
                if let Some(description) = &configuration.description {
                    slot.description = Some(description.clone());
                }
            }
            None => debug!(
                category = Category::Configuration.label(),
                "result slot missing; skipping"
            ),
        }
    }

    view.result_visible = true;
    view.pending_scroll = Some(ScrollBehavior::Smooth);
    view
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
