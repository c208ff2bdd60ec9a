use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Antall økter per uke (Man/Tir/Tor).
pub const SESSIONS_PER_WEEK: u32 = 3;

/// Ett steg i intervall-tabellen: løp/gå i minutter.
/// `walk_minutes == 0.0` betyr sammenhengende løp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalStep {
    pub run_minutes: f64,
    pub walk_minutes: f64,
}

impl IntervalStep {
    pub const fn new(run_minutes: f64, walk_minutes: f64) -> Self {
        Self { run_minutes, walk_minutes }
    }

    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.walk_minutes == 0.0
    }
}

/// Ordnet liste av intervall-steg, én per økt (indeks 1..N).
/// Sendes eksplisitt inn i øktgenereringen – ingen global tilstand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTable {
    pub steps: Vec<IntervalStep>,
}

impl IntervalTable {
    pub fn new(steps: Vec<IntervalStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steg for 1-basert øktindeks (None utenfor tabellen).
    pub fn step(&self, session_index: u32) -> Option<IntervalStep> {
        if session_index == 0 {
            return None;
        }
        self.steps.get(session_index as usize - 1).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    IntervalTraining,
    ContinuousRun,
    LongIntervals,
    ContinuousWithBreaks,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::IntervalTraining => "interval_training",
            WorkoutType::ContinuousRun => "continuous_run",
            WorkoutType::LongIntervals => "long_intervals",
            WorkoutType::ContinuousWithBreaks => "continuous_with_breaks",
        }
    }
}

/// Treningsdag innen uka. Slot 1..3 → Man/Tir/Tor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayName {
    Mon,
    Tue,
    Thu,
}

impl DayName {
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(DayName::Mon),
            2 => Some(DayName::Tue),
            3 => Some(DayName::Thu),
            _ => None,
        }
    }

    /// Ukedagsnummer med mandag = 1.
    pub fn day_of_week(&self) -> u8 {
        match self {
            DayName::Mon => 1,
            DayName::Tue => 2,
            DayName::Thu => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayName::Mon => "Mon",
            DayName::Tue => "Tue",
            DayName::Thu => "Thu",
        }
    }
}

/// Pulssoner (kun beskrivende metadata).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrZones {
    pub run: String,
    pub walk: String,
}

/// Én utledet økt. Beregnes på nytt fra tabell + regelmotor ved hvert kall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "session")]
    pub session_index: u32,
    #[serde(rename = "week")]
    pub week_number: u32,
    pub day_slot: u8,
    pub day_name: DayName,
    #[serde(rename = "day")]
    pub day_of_week: u8,
    pub run_minutes: f64,
    pub walk_minutes: f64,
    pub sets: u32,
    pub total_run_time: f64,
    pub total_workout_time: f64,
    pub workout_type: WorkoutType,
    pub focus: String,
    #[serde(rename = "target_hr_zones")]
    pub target_hr: HrZones,
}

impl SessionRecord {
    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.walk_minutes == 0.0
    }

    /// Samlet gåtid (0 for sammenhengende løp).
    pub fn total_walk_time(&self) -> f64 {
        if self.walk_minutes > 0.0 {
            self.walk_minutes * self.sets as f64
        } else {
            0.0
        }
    }
}

/// Brukerlogget ukeresultat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeeklyLog {
    #[serde(default)]
    pub pace: Option<f64>, // min/km
    #[serde(default)]
    pub distance: Option<f64>, // km
    #[serde(default)]
    pub recovery: Option<u8>, // 1–10
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub logged_at: String, // "YYYY-MM-DD HH:MM:SS"
}

/// Uke-nøkkel (streng) → logg. BTreeMap gir stabil rekkefølge i JSON.
pub type LogBook = BTreeMap<String, WeeklyLog>;

/// Logger sortert numerisk på uke. Ikke-numeriske nøkler hoppes over.
pub fn weeks_sorted(logs: &LogBook) -> Vec<(u32, &WeeklyLog)> {
    let mut out: Vec<(u32, &WeeklyLog)> = logs
        .iter()
        .filter_map(|(k, v)| k.trim().parse::<u32>().ok().map(|w| (w, v)))
        .collect();
    out.sort_by_key(|(w, _)| *w);
    out
}
