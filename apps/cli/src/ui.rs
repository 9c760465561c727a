//! Plain-text presentation of a [`ViewState`] for the terminal.

use std::fmt::Write as _;

use client_core::ViewState;

pub fn render_text(view: &ViewState) -> String {
    let mut out = String::new();
    if !view.result_visible {
        return out;
    }

    if let Some(heading) = &view.heading {
        let _ = writeln!(out, "{heading}");
    }

    for (id, slot) in view.slots() {
        let _ = write!(out, "{}:", id.category().label());
        if let Some(value) = &slot.value {
            let _ = write!(out, " {value}");
        }
        match &slot.fortune {
            Some(fortune) => {
                let _ = write!(out, " {}", fortune.text);
                if let Some(style) = fortune.style {
                    let _ = write!(out, " [{}]", style.class_name());
                }
            }
            None => out.push_str(" -"),
        }
        out.push('\n');
        if let Some(description) = &slot.description {
            for line in description.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use client_core::{renderer::render, ViewState};
    use shared::{domain::Gender, protocol::AnalysisResponse};

    use super::*;

    #[test]
    fn hidden_results_print_nothing() {
        assert_eq!(render_text(&ViewState::default()), "");
    }

    #[test]
    fn prints_heading_slots_styles_and_descriptions() {
        let response: AnalysisResponse = serde_json::from_str(
            r#"{"天格": "大吉", "天格_説明": "一行目\n二行目", "三才配置": "陽陽陰", "三才配置_運勢": "凶"}"#,
        )
        .expect("decode");
        let view = render(ViewState::default(), "山田", "太郎", Gender::Male, &response);
        let text = render_text(&view);

        assert!(text.starts_with("山田太郎さん（男性）の姓名判断結果\n"));
        assert!(text.contains("天格: 大吉 [daikichi]\n    一行目\n    二行目\n"));
        assert!(text.contains("人格: -\n"));
        assert!(text.contains("三才配置: 配置: 陽陽陰 凶 [kyo]\n"));
    }
}
