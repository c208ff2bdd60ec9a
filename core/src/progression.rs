use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::distance::{compute_distances, DistanceModel, PaceSettings, RoundTo, SessionDistance};
use crate::models::SessionRecord;

/// Målet for siste uke: minst 5 km løping.
pub const RACE_DISTANCE_KM: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionRating {
    Good,
    SomeRegression,
    NeedsImprovement,
}

impl ProgressionRating {
    /// ≤2 nedganger: bra, 3–4: noe tilbakegang, >4: må forbedres.
    pub fn from_decreases(decreases: usize) -> Self {
        match decreases {
            0..=2 => ProgressionRating::Good,
            3..=4 => ProgressionRating::SomeRegression,
            _ => ProgressionRating::NeedsImprovement,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ProgressionRating::Good => "Good progressive overload with minimal setbacks",
            ProgressionRating::SomeRegression => {
                "Some regression in progression - consider smoother increases"
            }
            ProgressionRating::NeedsImprovement => {
                "Too many regressions - progression needs improvement"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyTotals {
    pub week: u32,
    pub run_time: f64,
    pub total_time: f64,
    pub distance_km: f64,
    pub run_distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionReport {
    pub sessions: usize,
    pub decreases: usize,
    pub comparisons: usize,
    pub rating: ProgressionRating,
    pub starting_run_time: f64,
    pub final_run_time: f64,
    pub total_increase: f64,
    /// Økning i prosent av første økt; None når første økt har 0 løpetid.
    pub total_increase_pct: Option<f64>,
    pub avg_weekly_increase: f64,
    pub weekly: Vec<WeeklyTotals>,
    /// Andel uker med lik eller økt løpetid; None med færre enn 2 uker.
    pub weekly_consistency_pct: Option<f64>,
}

/// Antall økter der total løpetid går ned fra forrige økt.
pub fn count_decreases(sessions: &[SessionRecord]) -> usize {
    sessions
        .windows(2)
        .filter(|w| w[1].total_run_time < w[0].total_run_time)
        .count()
}

/// Ukesummer. `distances` må være i samme rekkefølge som `sessions`
/// (ekstra/manglende distanser ignoreres).
pub fn weekly_totals(sessions: &[SessionRecord], distances: &[SessionDistance]) -> Vec<WeeklyTotals> {
    let mut by_week: BTreeMap<u32, WeeklyTotals> = BTreeMap::new();

    for (i, s) in sessions.iter().enumerate() {
        let entry = by_week.entry(s.week_number).or_insert_with(|| WeeklyTotals {
            week: s.week_number,
            ..Default::default()
        });
        entry.run_time += s.total_run_time;
        entry.total_time += s.total_workout_time;
        if let Some(d) = distances.get(i) {
            entry.distance_km += d.total_distance_km();
            entry.run_distance_km += d.run_distance_km();
        }
    }

    by_week.into_values().collect()
}

pub fn weekly_consistency_pct(weekly: &[WeeklyTotals]) -> Option<f64> {
    if weekly.len() < 2 {
        return None;
    }
    let kept = weekly
        .windows(2)
        .filter(|w| w[1].run_time >= w[0].run_time)
        .count();
    Some(kept as f64 / (weekly.len() - 1) as f64 * 100.0)
}

pub fn analyze_progression(
    sessions: &[SessionRecord],
    distances: &[SessionDistance],
) -> Option<ProgressionReport> {
    let first = sessions.first()?;
    let last = sessions.last()?;

    let decreases = count_decreases(sessions);
    let weekly = weekly_totals(sessions, distances);

    let total_increase = last.total_run_time - first.total_run_time;
    let total_increase_pct = if first.total_run_time > 0.0 {
        Some(total_increase / first.total_run_time * 100.0)
    } else {
        None
    };
    let progression_weeks = weekly.len().saturating_sub(1).max(1) as f64;

    Some(ProgressionReport {
        sessions: sessions.len(),
        decreases,
        comparisons: sessions.len() - 1,
        rating: ProgressionRating::from_decreases(decreases),
        starting_run_time: first.total_run_time,
        final_run_time: last.total_run_time,
        total_increase,
        total_increase_pct,
        avg_weekly_increase: total_increase / progression_weeks,
        weekly_consistency_pct: weekly_consistency_pct(&weekly),
        weekly,
    })
}

/// Fart per intervallvarighet (første forekomst), sortert på varighet.
/// Verdi: (km/t, reduksjon i % fra grunnfart).
pub fn speed_by_interval_duration(
    sessions: &[SessionRecord],
    model: DistanceModel,
    settings: &PaceSettings,
) -> BTreeMap<OrderedFloat<f64>, (f64, f64)> {
    let mut out = BTreeMap::new();
    for (dist, s) in compute_distances(sessions, model, settings).iter().zip(sessions) {
        out.entry(OrderedFloat(s.run_minutes)).or_insert_with(|| {
            let reduction = if settings.run_speed_kmh > 0.0 {
                ((settings.run_speed_kmh - dist.adjusted_speed_kmh) / settings.run_speed_kmh * 100.0)
                    .round_to(1)
            } else {
                0.0
            };
            (dist.adjusted_speed_kmh, reduction)
        });
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub model: DistanceModel,
    pub baseline: DistanceModel,
    pub total_distance_km: f64,
    pub baseline_total_distance_km: f64,
    pub run_distance_km: f64,
    pub baseline_run_distance_km: f64,
    pub difference_km: f64,
    /// Differanse i % av baseline; None når baseline er 0.
    pub difference_pct: Option<f64>,
    pub final_week_run_distance_km: f64,
    pub baseline_final_week_run_distance_km: f64,
    pub meets_race_distance: bool,
}

/// Sammenligner en modell mot en baseline (typisk tretthet mot konstant fart).
pub fn compare_models(
    sessions: &[SessionRecord],
    model: DistanceModel,
    baseline: DistanceModel,
    settings: &PaceSettings,
) -> ModelComparison {
    let d_model = compute_distances(sessions, model, settings);
    let d_base = compute_distances(sessions, baseline, settings);

    let sum = |ds: &[SessionDistance], f: fn(&SessionDistance) -> f64| ds.iter().map(f).sum::<f64>();
    let total = sum(&d_model, SessionDistance::total_distance_km);
    let base_total = sum(&d_base, SessionDistance::total_distance_km);

    let final_week = |ds: &[SessionDistance]| {
        weekly_totals(sessions, ds)
            .last()
            .map(|w| w.run_distance_km)
            .unwrap_or(0.0)
    };
    let final_week_run = final_week(&d_model);

    let difference_km = base_total - total;
    ModelComparison {
        model,
        baseline,
        total_distance_km: total,
        baseline_total_distance_km: base_total,
        run_distance_km: sum(&d_model, SessionDistance::run_distance_km),
        baseline_run_distance_km: sum(&d_base, SessionDistance::run_distance_km),
        difference_km,
        difference_pct: if base_total > 0.0 {
            Some(difference_km / base_total * 100.0)
        } else {
            None
        },
        final_week_run_distance_km: final_week_run,
        baseline_final_week_run_distance_km: final_week(&d_base),
        meets_race_distance: final_week_run >= RACE_DISTANCE_KM,
    }
}
