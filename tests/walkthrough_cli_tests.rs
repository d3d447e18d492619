use std::path::PathBuf;
use std::process::{Command, Output};

use story_rs::api::StorySnapshot;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("titles_sample.csv")
}

fn walkthrough(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_story_walkthrough"))
        .args(args)
        .output()
        .expect("walkthrough binary should start")
}

fn snapshots(stdout: &[u8]) -> Vec<StorySnapshot> {
    let values: Vec<serde_json::Value> =
        serde_json::from_slice(stdout).expect("stdout should be a json array");
    values
        .iter()
        .map(|value| {
            StorySnapshot::from_json_compat_str(&value.to_string()).expect("contract snapshot")
        })
        .collect()
}

#[test]
fn replays_steps_and_prints_one_snapshot_per_step() {
    let input = fixture();
    let output = walkthrough(&[
        "--input",
        input.to_str().expect("utf-8 path"),
        "--step",
        "next",
        "--step",
        "click:2021",
        "--step",
        "toggle:on",
    ]);
    assert!(output.status.success());

    let snapshots = snapshots(&output.stdout);
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[0].navigation.scene_index(), 0);
    assert_eq!(snapshots[2].navigation.selected_year(), Some(2021));
    let last = snapshots[3].frame.as_ref().expect("frame");
    assert_eq!(last.title, "Top Countries in 2001-2021");
}

#[test]
fn missing_dataset_exits_with_failure_and_prints_nothing() {
    let output = walkthrough(&["--input", "no/such/titles.csv", "--step", "next"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read dataset"));
}

#[test]
fn failing_step_keeps_snapshots_taken_before_it() {
    let input = fixture();
    let output = walkthrough(&[
        "--input",
        input.to_str().expect("utf-8 path"),
        "--step",
        "hover:0",
        "--step",
        "click:2021",
        "--step",
        "next",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let snapshots = snapshots(&output.stdout);
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[1].tooltip.is_some());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ClickYear(2021)"));
}

#[test]
fn unknown_step_is_rejected_before_loading() {
    let output = walkthrough(&["--input", "no/such/titles.csv", "--step", "jump"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown step `jump`"));
}
