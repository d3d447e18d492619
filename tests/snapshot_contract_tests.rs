use story_rs::StoryError;
use story_rs::api::{
    STORY_SNAPSHOT_JSON_SCHEMA_V1, StoryConfig, StoryEngine, StorySnapshot,
    StorySnapshotJsonContractV1,
};
use story_rs::core::{ContentType, Dataset, Row};
use story_rs::render::{DerivedView, NullRenderer, YearScope};

fn dataset() -> Dataset {
    Dataset::new(vec![
        Row::new(2018, ContentType::Movie, "India"),
        Row::new(2018, ContentType::TvShow, "South Korea"),
        Row::new(2018, ContentType::TvShow, "South Korea, Japan"),
        Row::new(2020, ContentType::Movie, "Spain"),
    ])
}

fn engine_on_country_scene() -> StoryEngine<NullRenderer> {
    let mut engine =
        StoryEngine::new(NullRenderer::default(), dataset(), StoryConfig::default())
            .expect("engine init");
    engine.render().expect("render");
    engine.next().expect("next");
    engine.click_year_bar(2018).expect("click");
    engine
}

#[test]
fn snapshot_captures_navigation_frame_and_tooltip() {
    let mut engine = engine_on_country_scene();
    engine.hover_bar(0).expect("hover");

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.navigation.scene_index(), 2);
    assert_eq!(snapshot.navigation.selected_year(), Some(2018));
    assert_eq!(snapshot.scene_count, 3);
    assert_eq!(snapshot.filtered_row_count, 4);
    assert!(!snapshot.all_time);
    assert!(snapshot.controls.previous_enabled);
    assert!(!snapshot.controls.next_visible);

    let frame = snapshot.frame.as_ref().expect("frame captured");
    assert_eq!(frame.title, "Top Countries in 2018");
    let tooltip = snapshot.tooltip.as_ref().expect("tooltip captured");
    assert_eq!(tooltip.entries[0].value, "South Korea");
    assert_eq!(tooltip.entries[1].value, "2");
}

#[test]
fn snapshot_json_contract_v1_roundtrip() {
    let engine = engine_on_country_scene();
    let snapshot = engine.snapshot();

    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    let contract: StorySnapshotJsonContractV1 =
        serde_json::from_str(&json).expect("contract should parse");
    assert_eq!(contract.schema_version, STORY_SNAPSHOT_JSON_SCHEMA_V1);
    assert_eq!(contract.snapshot, snapshot);

    let restored = StorySnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn compat_parser_accepts_bare_snapshot() {
    let snapshot = engine_on_country_scene().snapshot();
    let json = snapshot.to_json_pretty().expect("snapshot should serialize");
    let restored = StorySnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn contract_json_uses_stable_field_names() {
    let snapshot = engine_on_country_scene().snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["schema_version"], 1);
    let frame = &value["snapshot"]["frame"];
    assert_eq!(frame["view"]["view"], "top_countries");
    assert_eq!(frame["view"]["scope"]["kind"], "year");
    assert_eq!(frame["view"]["scope"]["year"], 2018);
    assert_eq!(frame["view"]["countries"][0]["country"], "South Korea");
}

#[test]
fn compat_parser_rejects_unknown_schema_version() {
    let snapshot = engine_on_country_scene().snapshot();
    let payload = StorySnapshotJsonContractV1 {
        schema_version: 99,
        snapshot,
    };
    let json = serde_json::to_string(&payload).expect("serialize");
    let err = StorySnapshot::from_json_compat_str(&json).expect_err("v99 must fail");
    assert!(matches!(err, StoryError::InvalidData(_)));

    let err = StorySnapshot::from_json_compat_str("{\"not\":\"a snapshot\"}")
        .expect_err("garbage must fail");
    assert!(matches!(err, StoryError::InvalidData(_)));
}

#[test]
fn restore_snapshot_recomposes_scene_from_dataset() {
    let mut source = engine_on_country_scene();
    source.set_all_time(true).expect("toggle");
    let snapshot = source.snapshot();

    let mut target =
        StoryEngine::new(NullRenderer::default(), dataset(), StoryConfig::default())
            .expect("engine init");
    target.render().expect("render");
    target.restore_snapshot(&snapshot).expect("restore");

    assert_eq!(target.navigation(), snapshot.navigation);
    assert!(target.all_time());
    let frame = target.last_frame().expect("frame");
    assert_eq!(frame.title, "Top Countries in 2001-2021");
    let DerivedView::TopCountries { scope, countries } = &frame.view else {
        panic!("restored scene must draw top countries");
    };
    assert_eq!(*scope, YearScope::AllTime);
    let names: Vec<&str> = countries.iter().map(|c| c.country.as_str()).collect();
    assert_eq!(names, vec!["South Korea", "India", "Spain"]);
    assert_eq!(target.renderer().draw_count, 2);
}

#[test]
fn restore_rejects_state_missing_required_year() {
    let snapshot = engine_on_country_scene().snapshot();
    let mut json: serde_json::Value =
        serde_json::from_str(&snapshot.to_json_pretty().expect("serialize")).expect("json");
    json["navigation"]["selected_year"] = serde_json::Value::Null;
    let tampered: StorySnapshot = serde_json::from_value(json).expect("still well formed");

    let mut target =
        StoryEngine::new(NullRenderer::default(), dataset(), StoryConfig::default())
            .expect("engine init");
    let err = target
        .restore_snapshot(&tampered)
        .expect_err("scene 2 without a year must fail");
    assert!(matches!(
        err,
        StoryError::MissingSelectedYear { scene_index: 2 }
    ));
    assert_eq!(target.navigation().scene_index(), 0);
    assert_eq!(target.renderer().draw_count, 0);
}

#[test]
fn compat_parser_rejects_unreachable_states() {
    let mut engine = engine_on_country_scene();
    engine.hover_bar(1).expect("hover");
    let json = engine
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    let mut wrong_frame = value.clone();
    wrong_frame["snapshot"]["frame"]["scene_index"] = serde_json::json!(1);
    let err = StorySnapshot::from_json_compat_str(&wrong_frame.to_string())
        .expect_err("frame from another scene");
    assert!(matches!(err, StoryError::InvalidData(_)));

    let mut stray_tooltip = value.clone();
    stray_tooltip["snapshot"]["tooltip"]["bar_index"] = serde_json::json!(7);
    let err = StorySnapshot::from_json_compat_str(&stray_tooltip.to_string())
        .expect_err("tooltip past the last bar");
    assert!(matches!(err, StoryError::InvalidData(_)));

    let mut past_end = value;
    past_end["snapshot"]["scene_count"] = serde_json::json!(2);
    let err = StorySnapshot::from_json_compat_str(&past_end.to_string())
        .expect_err("scene past the end");
    assert!(matches!(
        err,
        StoryError::SceneOutOfRange { index: 2, len: 2 }
    ));
}

#[test]
fn compat_parser_rejects_non_numeric_schema_version() {
    let err = StorySnapshot::from_json_compat_str(r#"{"schema_version":"one","snapshot":{}}"#)
        .expect_err("string version");
    assert!(matches!(err, StoryError::InvalidData(_)));
}
