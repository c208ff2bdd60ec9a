use runplan_core::py::{
    advice_json, append_session_json, compare_telemetry_json, compute_distances_json,
    generate_sessions_json, progression_json, recompute_json,
};
use serde_json::{json, Value};

fn parse(s: &str) -> Value {
    serde_json::from_str(s).unwrap()
}

#[test]
fn generate_defaults_to_21_sessions() {
    let out = parse(&generate_sessions_json("{}").unwrap());
    let sessions = out.as_array().unwrap();
    assert_eq!(sessions.len(), 21);
    assert_eq!(sessions[20]["total_workout_time"], 12.0);

    let v1 = parse(&generate_sessions_json(r#"{"count": 3, "set_table": "v1"}"#).unwrap());
    assert_eq!(v1[1]["sets"], 13);
}

#[test]
fn parse_errors_name_the_path() {
    let err = generate_sessions_json(r#"{"count": "many"}"#).unwrap_err();
    assert!(err.contains("count"), "{err}");
}

#[test]
fn distances_accept_dashboard_paces() {
    let sessions = parse(&generate_sessions_json(r#"{"count": 1}"#).unwrap());
    let payload = json!({
        "sessions": sessions,
        "model": "fatigue_bands_5_tier",
        "run_pace": 6.0,
        "walk_pace": 10.0,
        "fixed_pace": true,
    });
    let out = parse(&compute_distances_json(&payload.to_string()).unwrap());
    // fast tempo: 10 km/t uten tretthet
    assert!((out[0]["adjusted_speed_kmh"].as_f64().unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn recompute_and_append_roundtrip_records() {
    let sessions = parse(&generate_sessions_json(r#"{"count": 4}"#).unwrap());

    let payload = json!({ "session": sessions[3], "overrides": { "sets": 2 } });
    let edited = parse(&recompute_json(&payload.to_string()).unwrap());
    assert_eq!(edited["total_workout_time"], 14.0);

    let bad = json!({ "session": sessions[3], "overrides": { "sets": 0 } });
    assert!(recompute_json(&bad.to_string()).is_err());

    let appended = parse(&append_session_json(&sessions.to_string()).unwrap());
    assert_eq!(appended["session"], 5);
}

#[test]
fn progression_reports_rating() {
    let sessions = parse(&generate_sessions_json("{}").unwrap());
    let out = parse(&progression_json(&json!({ "sessions": sessions }).to_string()).unwrap());
    assert_eq!(out["report"]["decreases"], 9);
    assert_eq!(out["report"]["rating"], "needs_improvement");
    assert_eq!(out["comparison"]["meets_race_distance"], true);
}

#[test]
fn advice_from_log_book() {
    let logs = json!({ "1": { "pace": 6.5, "skipped": true } });
    let out = parse(&advice_json(&logs.to_string()).unwrap());
    assert!(out["adjustments"]["2"].as_str().unwrap().contains("Reduce intensity"));
    assert_eq!(out["prediction"]["current_estimate_min"], 32.5);
    assert!(out["prediction_text"].as_str().unwrap().contains("32.5 minutes"));
}

#[test]
fn telemetry_against_default_plan() {
    let payload = json!({
        "observed": [{ "week": 1, "day": 2, "duration": "00:48:00", "avg_hr": "145" }]
    });
    let out = parse(&compare_telemetry_json(&payload.to_string()).unwrap());
    assert_eq!(out["comparisons"][0]["planned"]["session_index"], 2);
    assert_eq!(out["comparisons"][0]["hr_zone"], "hard");
    assert_eq!(out["summary"]["assessment"], "monitor_fatigue");
}
