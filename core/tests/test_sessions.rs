use runplan_core::sessions::{
    append_session, generate_default_sessions, generate_sessions, recompute, SessionOverrides,
};
use runplan_core::{IntervalTable, PlanError, SetCountTable, WorkoutType};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GoldenRow {
    session: u32,
    week: u32,
    day: String,
    run: f64,
    walk: f64,
    sets: u32,
    total_run: f64,
    total_workout: f64,
    workout_type: String,
}

fn golden() -> Vec<GoldenRow> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/plan_v2.csv");
    let mut rdr = csv::Reader::from_path(path).expect("kunne ikke åpne golden-fil");
    rdr.deserialize().map(|r| r.expect("ugyldig rad")).collect()
}

#[test]
fn default_plan_matches_golden_table() {
    let sessions = generate_default_sessions(21).unwrap();
    let rows = golden();
    assert_eq!(sessions.len(), rows.len());

    for (s, g) in sessions.iter().zip(&rows) {
        assert_eq!(s.session_index, g.session);
        assert_eq!(s.week_number, g.week, "uke for økt {}", g.session);
        assert_eq!(s.day_name.as_str(), g.day);
        assert_eq!(s.run_minutes, g.run);
        assert_eq!(s.walk_minutes, g.walk);
        assert_eq!(s.sets, g.sets, "sett for økt {}", g.session);
        assert_eq!(s.total_run_time, g.total_run, "løpetid for økt {}", g.session);
        assert_eq!(s.total_workout_time, g.total_workout, "total for økt {}", g.session);
        assert_eq!(s.workout_type.as_str(), g.workout_type);
    }
}

#[test]
fn records_obey_totals_and_day_mapping() {
    let sessions = generate_default_sessions(30).unwrap();
    for s in &sessions {
        assert_eq!(s.week_number, (s.session_index - 1) / 3 + 1);
        assert_eq!(s.day_slot as u32, (s.session_index - 1) % 3 + 1);
        assert!(s.sets >= 1);
        if s.walk_minutes == 0.0 {
            assert_eq!(s.sets, 1);
            assert_eq!(s.total_workout_time, s.run_minutes);
        } else {
            assert_eq!(s.total_workout_time, (s.run_minutes + s.walk_minutes) * s.sets as f64);
        }
        assert_eq!(s.total_run_time, s.run_minutes * s.sets as f64);
        assert_eq!(s.focus, "muscle_endurance");
    }
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(generate_default_sessions(21).unwrap(), generate_default_sessions(21).unwrap());
}

#[test]
fn count_one_and_zero() {
    let one = generate_default_sessions(1).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!((one[0].run_minutes, one[0].walk_minutes, one[0].sets), (1.0, 2.0, 16));

    match generate_default_sessions(0) {
        Err(PlanError::InvalidSessionCount(0)) => {}
        other => panic!("forventet InvalidSessionCount, fikk {other:?}"),
    }
}

#[test]
fn extrapolation_alternates_beyond_table() {
    let sessions = generate_default_sessions(24).unwrap();

    let s22 = &sessions[21];
    assert_eq!(s22.workout_type, WorkoutType::ContinuousWithBreaks);
    assert_eq!((s22.run_minutes, s22.walk_minutes, s22.sets), (22.0, 0.0, 1));
    assert_eq!(s22.week_number, 8);

    let s23 = &sessions[22];
    assert_eq!(s23.workout_type, WorkoutType::LongIntervals);
    assert_eq!((s23.run_minutes, s23.walk_minutes, s23.sets), (10.0, 3.0, 3));
    assert_eq!(s23.total_workout_time, 39.0);

    assert_eq!(sessions[23].run_minutes, 26.0);
}

#[test]
fn first_21_do_not_depend_on_count() {
    let short = generate_default_sessions(21).unwrap();
    let long = generate_default_sessions(27).unwrap();
    assert_eq!(short[..], long[..21]);
}

#[test]
fn v1_table_changes_only_first_three_weeks() {
    let table = IntervalTable::default();
    let v1 = generate_sessions(&table, SetCountTable::V1, 21).unwrap();
    let v2 = generate_sessions(&table, SetCountTable::V2, 21).unwrap();

    assert_eq!(v1[1].sets, 13);
    assert_eq!(v1[8].sets, 4);
    assert_eq!(v1[9..], v2[9..]);
}

#[test]
fn recompute_updates_totals() {
    let sessions = generate_default_sessions(21).unwrap();
    let s4 = &sessions[3];

    let edited = recompute(
        s4,
        &SessionOverrides { run_minutes: Some(5.0), sets: Some(5), ..Default::default() },
    )
    .unwrap();
    assert_eq!(edited.total_run_time, 25.0);
    assert_eq!(edited.total_workout_time, 40.0);
    assert_eq!(edited.session_index, 4);

    // gåtid 0 → sammenhengende, ett sett
    let continuous = recompute(
        s4,
        &SessionOverrides { walk_minutes: Some(0.0), ..Default::default() },
    )
    .unwrap();
    assert_eq!(continuous.sets, 1);
    assert_eq!(continuous.workout_type, WorkoutType::ContinuousRun);
    assert_eq!(continuous.total_workout_time, 4.0);

    assert!(recompute(s4, &SessionOverrides { sets: Some(0), ..Default::default() }).is_err());
    assert!(recompute(s4, &SessionOverrides { run_minutes: Some(-1.0), ..Default::default() }).is_err());
}

#[test]
fn append_uses_dashboard_defaults() {
    let first = append_session(&[]);
    assert_eq!((first.session_index, first.run_minutes, first.walk_minutes, first.sets), (1, 1.0, 2.0, 10));

    let sessions = generate_default_sessions(21).unwrap();
    let next = append_session(&sessions);
    assert_eq!(next.session_index, 22);
    assert_eq!(next.week_number, 8);
    assert_eq!((next.run_minutes, next.walk_minutes, next.sets), (5.0, 1.5, 6));
    assert_eq!(next.total_workout_time, 39.0);
}

#[test]
fn session_record_json_uses_dashboard_keys() {
    let sessions = generate_default_sessions(1).unwrap();
    let v = serde_json::to_value(&sessions[0]).unwrap();
    assert_eq!(v["session"], 1);
    assert_eq!(v["week"], 1);
    assert_eq!(v["day"], 1);
    assert_eq!(v["day_name"], "Mon");
    assert_eq!(v["workout_type"], "interval_training");
    assert_eq!(v["target_hr_zones"]["walk"], "100-120 bpm");
}
