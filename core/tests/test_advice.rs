use runplan_core::advice::{adjust_plan, predict_5k, predict_race, SUGGESTION_SEPARATOR};
use runplan_core::{LogBook, WeeklyLog};

fn book(entries: &[(&str, WeeklyLog)]) -> LogBook {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn week(pace: Option<f64>, recovery: Option<u8>, skipped: bool) -> WeeklyLog {
    WeeklyLog { pace, recovery, skipped, ..Default::default() }
}

#[test]
fn recovery_bands() {
    let logs = book(&[
        ("1", week(None, Some(3), false)),
        ("2", week(None, Some(5), false)),
        ("3", week(None, Some(7), false)),
        ("4", week(None, Some(9), false)),
    ]);
    let adj = adjust_plan(&logs);

    assert_eq!(adj[&2], "Add extra rest day or reduce intensity");
    assert_eq!(adj[&3], "Consider easier pace or shorter workouts");
    assert!(!adj.contains_key(&4), "recovery 7 gir ingen forslag");
    // ≥ 9 fanges av > 8
    assert_eq!(adj[&5], "You're recovering well! Maintain current intensity");
}

#[test]
fn suggestions_are_joined_in_order() {
    let logs = book(&[("1", week(None, Some(2), true))]);
    let adj = adjust_plan(&logs);
    assert_eq!(
        adj[&2],
        format!(
            "Reduce intensity (shorter intervals, more easy running){SUGGESTION_SEPARATOR}Add extra rest day or reduce intensity"
        )
    );
}

#[test]
fn pace_comparison_against_previous_week() {
    let faster = book(&[("1", week(Some(7.0), None, false)), ("2", week(Some(6.8), None, false))]);
    assert_eq!(adjust_plan(&faster)[&3], "Great pace improvement! Keep it up!");

    let slower = book(&[("1", week(Some(6.0), None, false)), ("2", week(Some(6.7), None, false))]);
    assert_eq!(adjust_plan(&slower)[&3], "Pace seems slower - focus on easy runs this week");

    // innenfor 10 %: ingen kommentar
    let steady = book(&[("1", week(Some(6.0), None, false)), ("2", week(Some(6.5), None, false))]);
    assert!(!adjust_plan(&steady).contains_key(&3));

    // tempo 0 regnes som manglende
    let zero = book(&[("1", week(Some(0.0), None, false)), ("2", week(Some(6.5), None, false))]);
    assert!(adjust_plan(&zero).is_empty());
}

#[test]
fn final_week_gets_no_next_week_advice() {
    let logs = book(&[("7", week(None, Some(2), true))]);
    assert!(adjust_plan(&logs).is_empty());
}

#[test]
fn non_numeric_keys_are_ignored() {
    let logs = book(&[("notes", week(Some(6.0), Some(2), true))]);
    assert!(adjust_plan(&logs).is_empty());
    assert!(predict_race(&logs).is_none());
}

#[test]
fn prediction_projects_remaining_weeks() {
    let logs = book(&[("3", week(Some(7.0), Some(8), false))]);
    let p = predict_race(&logs).unwrap();

    assert_eq!(p.based_on_week, 3);
    assert_eq!(p.current_estimate_min, 35.0);
    assert_eq!(p.weeks_remaining, 4);
    assert_eq!(p.weekly_improvement, 0.03);
    assert!((p.projected_min - 35.0 * 0.97_f64.powi(4)).abs() < 1e-9);
    assert!(p.potential_improvement_min() > 0.0);
}

#[test]
fn prediction_messages() {
    assert!(predict_5k(&LogBook::new()).contains("Not enough data"));

    let no_pace = book(&[("1", week(None, Some(6), false))]);
    assert!(predict_5k(&no_pace).contains("No pace data"));

    let done = book(&[("7", week(Some(6.0), None, false))]);
    let text = predict_5k(&done);
    assert!(text.contains("30.0 minutes"));
    assert!(text.contains("completed the training plan"));
}
