use super::*;
use serde_json::json;
use shared::{domain::FortuneStyle, protocol::AnalysisResponse};

fn response(value: serde_json::Value) -> AnalysisResponse {
    serde_json::from_value(value).expect("decode response")
}

fn full_response() -> AnalysisResponse {
    response(json!({
        "天格": "大吉", "天格_説明": "天",
        "人格": "中吉", "人格_説明": "人",
        "地格": "小吉", "地格_説明": "地",
        "外格": "末吉", "外格_説明": "外",
        "総格": "大凶", "総格_説明": "総",
        "三才配置": "木火土",
        "三才配置_運勢": "吉",
        "三才配置_説明": "配置の説明",
    }))
}

fn style_of(view: &ViewState, id: SlotId) -> Option<FortuneStyle> {
    view.slot(id)
        .and_then(|slot| slot.fortune.as_ref())
        .and_then(|fortune| fortune.style)
}

#[test]
fn heading_combines_name_gender_and_suffix() {
    assert_eq!(
        result_heading("山田", "花子", Gender::Female),
        "山田花子さん（女性）の姓名判断結果"
    );
}

#[test]
fn only_heaven_slot_is_filled_when_only_heaven_is_present() {
    let data = response(json!({"天格": "大吉", "天格_説明": "リーダーの素質"}));
    let view = render(ViewState::default(), "山田", "太郎", Gender::Male, &data);

    let heaven = view.slot(SlotId::Tenkaku).expect("slot");
    let fortune = heaven.fortune.as_ref().expect("fortune");
    assert_eq!(fortune.text, "大吉");
    assert_eq!(fortune.style, Some(FortuneStyle::Daikichi));
    assert_eq!(heaven.description.as_deref(), Some("リーダーの素質"));

    for id in [
        SlotId::Jinkaku,
        SlotId::Jikaku,
        SlotId::Gaikaku,
        SlotId::Soukaku,
    ] {
        assert_eq!(view.slot(id).and_then(|s| s.fortune.as_ref()), None, "{id:?}");
    }
    assert_eq!(
        view.heading.as_deref(),
        Some("山田太郎さん（男性）の姓名判断結果")
    );
    assert!(view.result_visible);
    assert_eq!(view.pending_scroll, Some(ScrollBehavior::Smooth));
}

#[test]
fn configuration_value_is_prefixed_and_fortune_styled() {
    let data = response(json!({"三才配置": "陽陽陰", "三才配置_運勢": "凶"}));
    let view = render(ViewState::default(), "山田", "太郎", Gender::Male, &data);

    let sansai = view.slot(SlotId::Sansai).expect("slot");
    assert_eq!(sansai.value.as_deref(), Some("配置: 陽陽陰"));
    let fortune = sansai.fortune.as_ref().expect("fortune");
    assert_eq!(fortune.text, "凶");
    assert_eq!(fortune.style, Some(FortuneStyle::Kyo));
    assert_eq!(sansai.description, None);
}

#[test]
fn configuration_parts_apply_independently() {
    let data = response(json!({"三才配置_説明": "説明だけ"}));
    let view = render(ViewState::default(), "山田", "太郎", Gender::Male, &data);

    let sansai = view.slot(SlotId::Sansai).expect("slot");
    assert_eq!(sansai.value, None);
    assert_eq!(sansai.fortune, None);
    assert_eq!(sansai.description.as_deref(), Some("説明だけ"));
}

#[test]
fn rendering_twice_does_not_accumulate_descriptions() {
    let data = full_response();
    let once = render(ViewState::default(), "山田", "太郎", Gender::Male, &data);
    assert_eq!(once.description_count(), 6);

    let twice = render(once.clone(), "山田", "太郎", Gender::Male, &data);
    assert_eq!(twice.description_count(), 6);
    assert_eq!(twice, once);
}

#[test]
fn stale_descriptions_are_cleared_by_next_render() {
    let first = render(
        ViewState::default(),
        "山田",
        "太郎",
        Gender::Male,
        &full_response(),
    );
    let second = render(
        first,
        "山田",
        "太郎",
        Gender::Male,
        &response(json!({"人格": "吉"})),
    );

    assert_eq!(second.description_count(), 0);
    assert_eq!(style_of(&second, SlotId::Jinkaku), Some(FortuneStyle::Kichi));
    // labels of categories absent from the new payload are left as they were
    assert_eq!(style_of(&second, SlotId::Tenkaku), Some(FortuneStyle::Daikichi));
}

#[test]
fn unrecognized_labels_render_without_style() {
    for label in ["特殊格", "大大吉", "吉凶混合", " ", "大吉 ", " 凶"] {
        let data = response(json!({"外格": label}));
        let view = render(ViewState::default(), "山田", "太郎", Gender::Male, &data);
        let fortune = view
            .slot(SlotId::Gaikaku)
            .and_then(|slot| slot.fortune.as_ref())
            .expect("fortune");
        assert_eq!(fortune.text, label);
        assert_eq!(fortune.style, None, "{label}");
    }
}

#[test]
fn restyling_replaces_previous_marker() {
    let mut fortune = None;
    set_fortune_class(&mut fortune, &FortuneLabel::parse("大吉"));
    set_fortune_class(&mut fortune, &FortuneLabel::parse("半凶"));
    assert_eq!(
        fortune,
        Some(FortuneDisplay {
            text: "半凶".to_string(),
            style: Some(FortuneStyle::Hankyo),
        })
    );

    set_fortune_class(&mut fortune, &FortuneLabel::parse("不明"));
    assert_eq!(fortune.and_then(|f| f.style), None);
}

#[test]
fn missing_slots_are_skipped_without_blocking_others() {
    let view = ViewState::with_slots([SlotId::Jinkaku, SlotId::Soukaku]);
    let view = render(view, "山田", "太郎", Gender::Male, &full_response());

    assert_eq!(view.slot(SlotId::Tenkaku), None);
    assert_eq!(view.slot(SlotId::Sansai), None);
    assert_eq!(style_of(&view, SlotId::Jinkaku), Some(FortuneStyle::Chukichi));
    assert_eq!(style_of(&view, SlotId::Soukaku), Some(FortuneStyle::Daikyo));
    assert_eq!(view.description_count(), 2);
    assert!(view.result_visible);
}

#[test]
fn empty_response_still_shows_heading() {
    let view = render(
        ViewState::default(),
        "佐藤",
        "一",
        Gender::Male,
        &AnalysisResponse::default(),
    );
    assert!(view.heading.is_some());
    assert!(view.slots().all(|(_, slot)| *slot == Default::default()));
    assert!(view.result_visible);
}
