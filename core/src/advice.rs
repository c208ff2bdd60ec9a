use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intervals::PLAN_WEEKS;
use crate::models::{weeks_sorted, LogBook};

pub const SUGGESTION_SEPARATOR: &str = " | ";

const RACE_KM: f64 = 5.0;
const DEFAULT_RECOVERY: u8 = 5;

/// Forslag for neste uke basert på hver logget uke.
///
/// Rekkefølge i en uke: hoppet over → restitusjon → tempo mot forrige uke.
/// Restitusjon ≥ 9 fanges allerede av > 8 og gir "maintain".
pub fn adjust_plan(logs: &LogBook) -> BTreeMap<u32, String> {
    let weeks = weeks_sorted(logs);
    let prev_pace = |week: u32| -> Option<f64> {
        weeks
            .iter()
            .find(|(w, _)| *w + 1 == week)
            .and_then(|(_, l)| l.pace)
            .filter(|p| *p != 0.0)
    };

    let mut adjustments = BTreeMap::new();
    for (week, data) in &weeks {
        let next_week = week + 1;
        if next_week > PLAN_WEEKS {
            continue;
        }

        let mut suggestions: Vec<&str> = Vec::new();

        if data.skipped {
            suggestions.push("Reduce intensity (shorter intervals, more easy running)");
        }

        if let Some(r) = data.recovery {
            if r < 4 {
                suggestions.push("Add extra rest day or reduce intensity");
            } else if r < 6 {
                suggestions.push("Consider easier pace or shorter workouts");
            } else if r > 8 {
                suggestions.push("You're recovering well! Maintain current intensity");
            } else if r >= 9 {
                suggestions.push("Consider slightly increasing intensity or adding extra workout");
            }
        }

        if *week > 1 {
            let pace = data.pace.filter(|p| *p != 0.0);
            if let (Some(pace), Some(prev)) = (pace, prev_pace(*week)) {
                if pace < prev {
                    suggestions.push("Great pace improvement! Keep it up!");
                } else if pace > prev * 1.1 {
                    suggestions.push("Pace seems slower - focus on easy runs this week");
                }
            }
        }

        if !suggestions.is_empty() {
            adjustments.insert(next_week, suggestions.join(SUGGESTION_SEPARATOR));
        }
    }
    adjustments
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePrediction {
    pub based_on_week: u32,
    pub pace: f64,
    pub current_estimate_min: f64,
    pub weekly_improvement: f64,
    pub weeks_remaining: u32,
    pub projected_min: f64,
}

impl RacePrediction {
    pub fn potential_improvement_min(&self) -> f64 {
        self.current_estimate_min - self.projected_min
    }
}

/// 2.5 % per uke, 3 % ved restitusjon ≥ 8, 1.5 % ved ≤ 4.
pub fn weekly_improvement_rate(recovery: Option<u8>) -> f64 {
    match recovery.unwrap_or(DEFAULT_RECOVERY) {
        r if r >= 8 => 0.03,
        r if r <= 4 => 0.015,
        _ => 0.025,
    }
}

/// Prognose fra siste uke med tempo.
pub fn predict_race(logs: &LogBook) -> Option<RacePrediction> {
    let (week, data) = weeks_sorted(logs)
        .into_iter()
        .filter(|(_, l)| l.pace.is_some())
        .last()?;
    let pace = data.pace?;

    let current = pace * RACE_KM;
    let weeks_remaining = PLAN_WEEKS.saturating_sub(week);
    let rate = weekly_improvement_rate(data.recovery);
    let projected = current * (1.0 - rate).powi(weeks_remaining as i32);

    Some(RacePrediction {
        based_on_week: week,
        pace,
        current_estimate_min: current,
        weekly_improvement: rate,
        weeks_remaining,
        projected_min: projected,
    })
}

/// "t:mm.m" – timer og minutter.
fn hours_minutes(minutes: f64) -> String {
    format!("{:.0}:{:04.1}", (minutes / 60.0).floor(), minutes % 60.0)
}

pub fn predict_5k(logs: &LogBook) -> String {
    if logs.is_empty() {
        return "📊 Not enough data to predict race time. Start logging your weekly performance!"
            .to_string();
    }
    let Some(p) = predict_race(logs) else {
        return "📊 No pace data available. Log your running pace to get predictions!".to_string();
    };

    let mut out = format!(
        "📊 5K Time Prediction (based on Week {} data):\n",
        p.based_on_week
    );
    out.push_str(&format!(
        "   Current estimated time: {:.1} minutes ({})\n",
        p.current_estimate_min,
        hours_minutes(p.current_estimate_min)
    ));

    if p.weeks_remaining > 0 {
        out.push_str(&format!(
            "   Projected race day time: {:.1} minutes ({})\n",
            p.projected_min,
            hours_minutes(p.projected_min)
        ));
        out.push_str(&format!(
            "   Potential improvement: {:.1} minutes\n",
            p.potential_improvement_min()
        ));
        out.push_str(&format!("   Weeks remaining: {}", p.weeks_remaining));
    } else {
        out.push_str("   🏁 You've completed the training plan! Time to race!");
    }
    out
}
