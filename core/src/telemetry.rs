//! Observert økt-telemetri (OCR-utdrag fra klokke-skjermbilder) mot planen.
//!
//! Inndata er en JSON-liste der alle målefelt er valgfrie strenger. Hvert
//! element tolkes for seg; ett ødelagt element stopper ikke resten.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::distance::{session_distance, DistanceModel, PaceSettings, RoundTo};
use crate::error::{PlanError, Result};
use crate::metrics;
use crate::models::{SessionRecord, SESSIONS_PER_WEEK};

/// Ett element slik OCR-verktøyet skriver det.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedSession {
    pub week: u32,
    pub day: u32,
    #[serde(default)]
    pub duration: Option<String>, // "HH:MM:SS"
    #[serde(default)]
    pub distance: Option<String>, // km
    #[serde(default)]
    pub avg_pace: Option<String>, // "M:SS"
    #[serde(default)]
    pub avg_hr: Option<String>,
    #[serde(default)]
    pub max_hr: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    #[serde(default)]
    pub calories: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ObservedSession {
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration.as_deref().and_then(parse_duration_minutes)
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.distance.as_deref().and_then(parse_number).filter(|d| *d >= 0.0)
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        self.avg_pace.as_deref().and_then(parse_pace_minutes)
    }

    pub fn avg_hr_bpm(&self) -> Option<u32> {
        self.avg_hr.as_deref().and_then(parse_number).map(|h| h.round() as u32)
    }

    /// Tempo fra varighet/distanse når klokka ikke viste det.
    pub fn derived_pace(&self) -> Option<f64> {
        let minutes = self.duration_minutes()?;
        let km = self.distance_km().filter(|d| *d > 0.0)?;
        Some((minutes / km).round_to(2))
    }
}

/// "HH:MM:SS" eller "MM:SS" → minutter.
pub fn parse_duration_minutes(s: &str) -> Option<f64> {
    let parts: Vec<u32> = s
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [h, m, sec] if *m < 60 && *sec < 60 => Some(*h as f64 * 60.0 + *m as f64 + *sec as f64 / 60.0),
        [m, sec] if *sec < 60 => Some(*m as f64 + *sec as f64 / 60.0),
        _ => None,
    }
}

/// "M:SS" (evt. med ' og ") → min/km.
pub fn parse_pace_minutes(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .map(|c| if c == '\'' { ':' } else { c })
        .filter(|c| *c != '"')
        .collect();
    let (m, sec) = cleaned.trim_end_matches(':').split_once(':')?;
    let m: u32 = m.trim().parse().ok()?;
    let sec: u32 = sec.trim().parse().ok()?;
    if sec >= 60 {
        return None;
    }
    Some(m as f64 + sec as f64 / 60.0)
}

pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tolker en JSON-liste av økter. Elementer som ikke kan tolkes logges og hoppes over.
pub fn parse_observed(json: &str) -> Result<Vec<ObservedSession>> {
    let mut de = serde_json::Deserializer::from_str(json);
    let items: Vec<Value> = serde_path_to_error::deserialize(&mut de).map_err(|source| {
        PlanError::Json { path: "<telemetry>".into(), source }
    })?;

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_path_to_error::deserialize::<_, ObservedSession>(item) {
            Ok(s) => out.push(s),
            Err(e) => {
                log::warn!("hopper over telemetri-element {i} ({}): {}", e.path(), e.inner());
                metrics::global().telemetry_records_skipped_total.inc();
            }
        }
    }
    Ok(out)
}

pub fn load_observed(path: &Path) -> Result<Vec<ObservedSession>> {
    let contents = fs::read_to_string(path).map_err(|e| PlanError::io(path, e))?;
    parse_observed(&contents).map_err(|e| match e {
        PlanError::Json { source, .. } => PlanError::Json { path: path.to_path_buf(), source },
        other => other,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrZone {
    EasyRecovery,
    Moderate,
    Hard,
    VeryHard,
}

impl HrZone {
    pub fn from_bpm(bpm: u32) -> Self {
        match bpm {
            0..=119 => HrZone::EasyRecovery,
            120..=139 => HrZone::Moderate,
            140..=159 => HrZone::Hard,
            _ => HrZone::VeryHard,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            HrZone::EasyRecovery => "Easy/Recovery (Good for walk intervals)",
            HrZone::Moderate => "Moderate (Good overall intensity)",
            HrZone::Hard => "Hard (High intensity - may be too much)",
            HrZone::VeryHard => "Very Hard (Too intense for base training)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSummary {
    pub session_index: u32,
    pub run_minutes: f64,
    pub walk_minutes: f64,
    pub sets: u32,
    pub total_workout_time: f64,
    pub expected_distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionComparison {
    pub week: u32,
    pub day: u32,
    pub planned: Option<PlannedSummary>,
    pub actual_minutes: Option<f64>,
    pub actual_distance_km: Option<f64>,
    pub pace_min_per_km: Option<f64>,
    pub avg_hr: Option<u32>,
    pub hr_zone: Option<HrZone>,
    /// Avvik i minutter (faktisk - planlagt); None om ett av dem mangler.
    pub duration_delta_min: Option<f64>,
    pub notes: Vec<String>,
}

fn planned_for<'a>(planned: &'a [SessionRecord], week: u32, day: u32) -> Option<&'a SessionRecord> {
    if week == 0 || day == 0 || day > SESSIONS_PER_WEEK {
        return None;
    }
    let index = (week - 1) * SESSIONS_PER_WEEK + day;
    planned.iter().find(|s| s.session_index == index)
}

fn hr_notes(week: u32, day: u32, hr: u32) -> Vec<String> {
    let mut notes = Vec::new();
    if week == 1 {
        if hr > 150 {
            notes.push(format!("HR {hr} is quite high for Week 1 - plan may be too aggressive"));
        } else if hr > 140 {
            notes.push(format!("HR {hr} is moderately high - monitor fatigue"));
        } else {
            notes.push(format!("HR {hr} is good for base building"));
        }
    }
    if day == 3 && hr > 140 {
        notes.push("Session 3 HR high - indicates cumulative fatigue".to_string());
    }
    notes
}

/// Matcher hver observert økt mot planen på (uke, dag-slot).
/// Forventet distanse regnes med konstant fart (12 km/t løp, 6 km/t gange).
pub fn compare_sessions(observed: &[ObservedSession], planned: &[SessionRecord]) -> Vec<SessionComparison> {
    let settings = PaceSettings::default();

    observed
        .iter()
        .map(|o| {
            let plan = planned_for(planned, o.week, o.day).map(|p| PlannedSummary {
                session_index: p.session_index,
                run_minutes: p.run_minutes,
                walk_minutes: p.walk_minutes,
                sets: p.sets,
                total_workout_time: p.total_workout_time,
                expected_distance_km: session_distance(p, DistanceModel::ConstantSpeed, &settings)
                    .total_distance_km(),
            });

            let actual_minutes = o.duration_minutes();
            let avg_hr = o.avg_hr_bpm();
            let duration_delta_min = match (&plan, actual_minutes) {
                (Some(p), Some(a)) => Some(a - p.total_workout_time),
                _ => None,
            };

            SessionComparison {
                week: o.week,
                day: o.day,
                actual_minutes,
                actual_distance_km: o.distance_km(),
                pace_min_per_km: o.pace_min_per_km().or_else(|| o.derived_pace()),
                avg_hr,
                hr_zone: avg_hr.map(HrZone::from_bpm),
                duration_delta_min,
                notes: avg_hr.map(|hr| hr_notes(o.week, o.day, hr)).unwrap_or_default(),
                planned: plan,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    TooAggressive,
    MonitorFatigue,
    IntensityGood,
}

impl Assessment {
    pub fn describe(&self) -> &'static str {
        match self {
            Assessment::TooAggressive => "Plan appears too aggressive - consider reducing interval duration or intensity",
            Assessment::MonitorFatigue => "Monitor fatigue carefully - ensure adequate recovery between sessions",
            Assessment::IntensityGood => "Training intensity looks good",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    pub sessions: usize,
    pub avg_hr: f64,
    pub max_session_hr: u32,
    pub assessment: Assessment,
}

/// Oppsummering over alle økter med puls. None uten pulsdata.
pub fn summarize(observed: &[ObservedSession]) -> Option<TelemetrySummary> {
    let hrs: Vec<u32> = observed.iter().filter_map(|o| o.avg_hr_bpm()).collect();
    let max_session_hr = *hrs.iter().max()?;
    let avg_hr = hrs.iter().map(|h| *h as f64).sum::<f64>() / hrs.len() as f64;

    let assessment = if avg_hr > 145.0 {
        Assessment::TooAggressive
    } else if avg_hr > 130.0 {
        Assessment::MonitorFatigue
    } else {
        Assessment::IntensityGood
    };

    Some(TelemetrySummary {
        sessions: observed.len(),
        avg_hr,
        max_session_hr,
        assessment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_accept_two_or_three_fields() {
        assert_eq!(parse_duration_minutes("00:48:30"), Some(48.5));
        assert_eq!(parse_duration_minutes("1:02:00"), Some(62.0));
        assert_eq!(parse_duration_minutes("12:30"), Some(12.5));
        assert_eq!(parse_duration_minutes("12:75"), None);
        assert_eq!(parse_duration_minutes("abc"), None);
    }

    #[test]
    fn pace_accepts_watch_style_quotes() {
        assert_eq!(parse_pace_minutes("7:30"), Some(7.5));
        assert_eq!(parse_pace_minutes("7'30\""), Some(7.5));
        assert_eq!(parse_pace_minutes("7"), None);
    }

    #[test]
    fn zones_split_at_20_bpm_steps() {
        assert_eq!(HrZone::from_bpm(119), HrZone::EasyRecovery);
        assert_eq!(HrZone::from_bpm(120), HrZone::Moderate);
        assert_eq!(HrZone::from_bpm(159), HrZone::Hard);
        assert_eq!(HrZone::from_bpm(160), HrZone::VeryHard);
    }
}
