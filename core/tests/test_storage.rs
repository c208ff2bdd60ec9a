use std::fs;
use std::path::PathBuf;

use runplan_core::metrics;
use runplan_core::storage::{LogStore, WeeklyLogInput};

fn tmp_path(name: &str) -> PathBuf {
    let path = PathBuf::from(format!("tests/tmp_{name}.json"));
    fs::remove_file(&path).ok();
    path
}

#[test]
fn missing_file_loads_as_empty() {
    let path = tmp_path("missing_log");
    let store = LogStore::new(&path);
    assert!(store.load_logs().is_empty());
    assert_eq!(store.get_current_week(), 0);
}

#[test]
fn corrupted_file_falls_back_to_empty() {
    let path = tmp_path("corrupt_log");
    fs::write(&path, "{ not json").unwrap();

    let store = LogStore::new(&path);
    assert!(store.load_logs().is_empty());

    fs::remove_file(&path).ok();
}

#[test]
fn log_week_roundtrips_through_disk() {
    let path = tmp_path("roundtrip_log");
    let store = LogStore::new(&path);

    let entry = store
        .log_week(
            2,
            WeeklyLogInput {
                pace: Some(6.5),
                distance: Some(12.3),
                recovery: Some(7),
                skipped: false,
                comments: "felt good".to_string(),
            },
        )
        .expect("kunne ikke logge uke");
    assert_eq!(entry.logged_at.len(), "2024-01-01 00:00:00".len());

    let loaded = LogStore::new(&path).load_logs();
    assert_eq!(loaded.get("2"), Some(&entry));

    // JSON-nøkkel er ukenummeret som streng
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["2"]["pace"], 6.5);
    assert_eq!(raw["2"]["comments"], "felt good");

    fs::remove_file(&path).ok();
}

#[test]
fn relogging_a_week_overwrites_it() {
    let path = tmp_path("overwrite_log");
    let store = LogStore::new(&path);

    store.log_week(1, WeeklyLogInput { pace: Some(7.0), ..Default::default() }).unwrap();
    store.log_week(1, WeeklyLogInput { pace: Some(6.8), ..Default::default() }).unwrap();

    let logs = store.load_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs["1"].pace, Some(6.8));

    fs::remove_file(&path).ok();
}

#[test]
fn invalid_input_is_rejected_before_writing() {
    let path = tmp_path("invalid_log");
    let store = LogStore::new(&path);

    assert!(store.log_week(0, WeeklyLogInput::default()).is_err());
    assert!(store.log_week(1, WeeklyLogInput { recovery: Some(11), ..Default::default() }).is_err());
    assert!(store.log_week(1, WeeklyLogInput { pace: Some(-2.0), ..Default::default() }).is_err());
    assert!(!path.exists());
}

#[test]
fn current_week_is_highest_logged() {
    let path = tmp_path("current_week_log");
    let store = LogStore::new(&path);

    store.log_week(1, WeeklyLogInput::default()).unwrap();
    store.log_week(3, WeeklyLogInput::default()).unwrap();
    assert_eq!(store.get_current_week(), 3);

    let history: Vec<u32> = store.history().iter().map(|(w, _)| *w).collect();
    assert_eq!(history, vec![1, 3]);

    fs::remove_file(&path).ok();
}

#[test]
fn week_one_pace_predicts_32_5_minutes() {
    let path = tmp_path("predict_log");
    let store = LogStore::new(&path);

    store.log_week(1, WeeklyLogInput { pace: Some(6.5), ..Default::default() }).unwrap();
    assert_eq!(store.get_current_week(), 1);

    let text = store.predict_5k();
    assert!(text.contains("32.5 minutes"), "{text}");

    fs::remove_file(&path).ok();
}

#[test]
fn skipped_week_suggests_reducing_intensity() {
    let path = tmp_path("skipped_log");
    let store = LogStore::new(&path);

    store.log_week(1, WeeklyLogInput { skipped: true, ..Default::default() }).unwrap();
    let adjustments = store.adjust_plan();
    assert!(adjustments[&2].contains("Reduce intensity"));

    fs::remove_file(&path).ok();
}

#[test]
fn export_and_reset() {
    let path = tmp_path("export_src_log");
    let target = tmp_path("export_dst_log");
    let store = LogStore::new(&path);

    store.log_week(4, WeeklyLogInput { distance: Some(15.0), ..Default::default() }).unwrap();
    let written = store.export_logs(Some(target.as_path())).unwrap();
    assert_eq!(written, target);
    assert_eq!(LogStore::new(&target).load_logs(), store.load_logs());

    assert!(store.reset().unwrap());
    assert!(!store.reset().unwrap());
    assert!(store.load_logs().is_empty());

    fs::remove_file(&target).ok();
}

#[test]
fn one_bad_week_does_not_drop_the_rest() {
    let path = tmp_path("bad_week_log");
    let good = r#"{ "pace": 6.5, "distance": null, "recovery": 7, "skipped": false, "comments": "", "logged_at": "2024-01-01 10:00:00" }"#;
    let bad = r#"{ "pace": 6.4, "recovery": 7.5, "logged_at": "2024-01-08 10:00:00" }"#;
    fs::write(&path, format!(r#"{{ "1": {good}, "2": {bad} }}"#)).unwrap();

    let skipped = metrics::global().log_entries_skipped_total.get();
    let store = LogStore::new(&path);
    let logs = store.load_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs["1"].recovery, Some(7));
    assert!(metrics::global().log_entries_skipped_total.get() >= skipped + 1);

    // ny uke skrives uten å miste uken som ikke kunne tolkes
    store.log_week(3, WeeklyLogInput { pace: Some(6.2), ..Default::default() }).unwrap();
    let weeks: Vec<u32> = store.history().iter().map(|(w, _)| *w).collect();
    assert_eq!(weeks, vec![1, 3]);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["2"]["recovery"], 7.5);

    fs::remove_file(&path).ok();
}

#[test]
fn save_of_loaded_logs_leaves_file_unchanged() {
    let path = tmp_path("resave_log");
    let store = LogStore::new(&path);

    store.save_logs(&Default::default()).unwrap();
    let empty = fs::read_to_string(&path).unwrap();
    store.save_logs(&store.load_logs()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), empty);

    store
        .log_week(
            1,
            WeeklyLogInput {
                pace: Some(6.5),
                distance: Some(12.5),
                recovery: Some(6),
                skipped: true,
                comments: "windy".to_string(),
            },
        )
        .unwrap();
    let written = fs::read_to_string(&path).unwrap();
    store.save_logs(&store.load_logs()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), written);

    fs::remove_file(&path).ok();
}
