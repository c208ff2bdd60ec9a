use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::metrics;
use crate::models::{
    DayName, HrZones, IntervalTable, SessionRecord, WorkoutType, SESSIONS_PER_WEEK,
};
use crate::sets::SetCountTable;

pub const DEFAULT_SESSION_COUNT: u32 = 21;

const FOCUS: &str = "muscle_endurance";

// Ekstrapolering etter tabellen: lange intervaller på oddetall
const LONG_INTERVAL_RUN: f64 = 10.0;
const LONG_INTERVAL_WALK: f64 = 3.0;

/// Øktnummer teller fra 1; 0 behandles som økt 1.
#[inline]
pub fn week_of(session_index: u32) -> u32 {
    session_index.saturating_sub(1) / SESSIONS_PER_WEEK + 1
}

#[inline]
pub fn day_slot_of(session_index: u32) -> u8 {
    (session_index.saturating_sub(1) % SESSIONS_PER_WEEK + 1) as u8
}

/// Pulssoner: tirsdag er den harde dagen.
pub fn hr_zones_for(day_slot: u8) -> HrZones {
    let run = if day_slot == 2 { "140-160 bpm" } else { "130-150 bpm" };
    HrZones {
        run: run.to_string(),
        walk: "100-120 bpm".to_string(),
    }
}

/// (total_run_time, total_workout_time) fra løp/gå/sett.
pub fn session_totals(run_minutes: f64, walk_minutes: f64, sets: u32) -> (f64, f64) {
    let sets = sets as f64;
    let total_run = run_minutes * sets;
    let total_workout = if walk_minutes > 0.0 {
        (run_minutes + walk_minutes) * sets
    } else {
        run_minutes
    };
    (total_run, total_workout)
}

fn build_record(
    session_index: u32,
    run_minutes: f64,
    walk_minutes: f64,
    sets: u32,
    workout_type: WorkoutType,
) -> SessionRecord {
    let day_slot = day_slot_of(session_index);
    // slot er alltid 1..=3 når SESSIONS_PER_WEEK == 3
    let day_name = DayName::from_slot(day_slot).unwrap_or(DayName::Mon);
    let (total_run_time, total_workout_time) = session_totals(run_minutes, walk_minutes, sets);

    SessionRecord {
        session_index,
        week_number: week_of(session_index),
        day_slot,
        day_name,
        day_of_week: day_name.day_of_week(),
        run_minutes,
        walk_minutes,
        sets,
        total_run_time,
        total_workout_time,
        workout_type,
        focus: FOCUS.to_string(),
        target_hr: hr_zones_for(day_slot),
    }
}

/// Utvider intervall-tabellen til `count` økter.
///
/// Innenfor tabellen leses (løp, gå) direkte. Etter tabellen veksles det på
/// paritet: oddetall gir lange intervaller (10/3), partall et sammenhengende løp
/// som øker med 2 min per økt forbi tabellens slutt.
pub fn generate_sessions(
    table: &IntervalTable,
    set_table: SetCountTable,
    count: u32,
) -> Result<Vec<SessionRecord>> {
    if count == 0 {
        return Err(PlanError::InvalidSessionCount(count));
    }

    let table_len = table.len() as u32;
    let mut sessions = Vec::with_capacity(count as usize);

    for session_index in 1..=count {
        let week = week_of(session_index);

        let record = match table.step(session_index) {
            Some(step) => {
                let sets =
                    set_table.compute_sets(table, session_index, step.run_minutes, week);
                let workout_type = if step.is_continuous() {
                    WorkoutType::ContinuousRun
                } else {
                    WorkoutType::IntervalTraining
                };
                build_record(session_index, step.run_minutes, step.walk_minutes, sets, workout_type)
            }
            None if session_index % 2 == 1 => {
                let sets = set_table.compute_sets(table, session_index, LONG_INTERVAL_RUN, week);
                build_record(
                    session_index,
                    LONG_INTERVAL_RUN,
                    LONG_INTERVAL_WALK,
                    sets,
                    WorkoutType::LongIntervals,
                )
            }
            None => {
                let run = 20.0 + 2.0 * (session_index - table_len) as f64;
                build_record(session_index, run, 0.0, 1, WorkoutType::ContinuousWithBreaks)
            }
        };
        sessions.push(record);
    }

    log::debug!(
        "genererte {} økter (tabell={} steg, sett={:?})",
        sessions.len(),
        table_len,
        set_table
    );
    metrics::global().sessions_generated_total.inc_by(sessions.len() as u64);

    Ok(sessions)
}

/// Standardtabell + kanonisk settabell (V2).
pub fn generate_default_sessions(count: u32) -> Result<Vec<SessionRecord>> {
    generate_sessions(&IntervalTable::default(), SetCountTable::V2, count)
}

/// Overstyringer fra en redigerbar tabell (dashboard).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionOverrides {
    #[serde(default)]
    pub run_minutes: Option<f64>,
    #[serde(default)]
    pub walk_minutes: Option<f64>,
    #[serde(default)]
    pub sets: Option<u32>,
}

/// Ren reducer: nytt record fra et eksisterende + overstyringer.
/// Totaler regnes alltid på nytt, aldri kopiert.
pub fn recompute(record: &SessionRecord, overrides: &SessionOverrides) -> Result<SessionRecord> {
    let run = overrides.run_minutes.unwrap_or(record.run_minutes);
    let walk = overrides.walk_minutes.unwrap_or(record.walk_minutes);
    let sets = overrides.sets.unwrap_or(record.sets);

    if !run.is_finite() || run < 0.0 {
        return Err(PlanError::invalid("run_minutes", format!("{run} is not a valid duration")));
    }
    if !walk.is_finite() || walk < 0.0 {
        return Err(PlanError::invalid("walk_minutes", format!("{walk} is not a valid duration")));
    }
    if sets == 0 {
        return Err(PlanError::invalid("sets", "must be at least 1"));
    }

    let (sets, workout_type) = if walk == 0.0 {
        let t = match record.workout_type {
            WorkoutType::ContinuousWithBreaks => WorkoutType::ContinuousWithBreaks,
            _ => WorkoutType::ContinuousRun,
        };
        (1, t)
    } else {
        let t = match record.workout_type {
            WorkoutType::LongIntervals => WorkoutType::LongIntervals,
            _ => WorkoutType::IntervalTraining,
        };
        (sets, t)
    };

    let (total_run_time, total_workout_time) = session_totals(run, walk, sets);
    Ok(SessionRecord {
        run_minutes: run,
        walk_minutes: walk,
        sets,
        total_run_time,
        total_workout_time,
        workout_type,
        ..record.clone()
    })
}

/// Legger til en ny økt etter de eksisterende (dashboardets "legg til økt").
/// Første økt: 1/2 × 10. Senere økter: 5/1.5 × 6.
pub fn append_session(existing: &[SessionRecord]) -> SessionRecord {
    match existing.last() {
        None => build_record(1, 1.0, 2.0, 10, WorkoutType::IntervalTraining),
        Some(last) => build_record(
            last.session_index.saturating_add(1),
            5.0,
            1.5,
            6,
            WorkoutType::IntervalTraining,
        ),
    }
}
