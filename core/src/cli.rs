//! Tekstrapporter for `runplan`-binæren.

use std::fmt::Write as _;

use crate::distance::SessionDistance;
use crate::models::{SessionRecord, WeeklyLog};
use crate::overview::fmt_min;
use crate::progression::{ModelComparison, ProgressionReport};
use crate::telemetry::{SessionComparison, TelemetrySummary};

/// Økttabell, valgfritt med distanser (samme rekkefølge som øktene).
pub fn render_sessions(sessions: &[SessionRecord], distances: Option<&[SessionDistance]>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{:>4} {:>4} {:<4} {:>6} {:>6} {:>5} {:>8} {:>8}  {:<22}",
        "#", "Week", "Day", "Run", "Walk", "Sets", "RunTot", "Total", "Type"
    );
    if distances.is_some() {
        let _ = write!(out, " {:>8}", "Km");
    }
    out.push('\n');

    for (i, s) in sessions.iter().enumerate() {
        let _ = write!(
            out,
            "{:>4} {:>4} {:<4} {:>6} {:>6} {:>5} {:>8} {:>8}  {:<22}",
            s.session_index,
            s.week_number,
            s.day_name.as_str(),
            fmt_min(s.run_minutes),
            fmt_min(s.walk_minutes),
            s.sets,
            fmt_min(s.total_run_time),
            fmt_min(s.total_workout_time),
            s.workout_type.as_str(),
        );
        if let Some(d) = distances.and_then(|ds| ds.get(i)) {
            let _ = write!(out, " {:>8.2}", d.total_distance_km());
        }
        out.push('\n');
    }
    out
}

pub fn render_progression(report: &ProgressionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Progression ---");
    let _ = writeln!(
        out,
        "Decreases: {}/{} ({})",
        report.decreases,
        report.comparisons,
        report.rating.describe()
    );
    let _ = writeln!(
        out,
        "Run time: {} → {} min ({:+.1} min{})",
        fmt_min(report.starting_run_time),
        fmt_min(report.final_run_time),
        report.total_increase,
        report
            .total_increase_pct
            .map(|p| format!(", {p:.0}%"))
            .unwrap_or_default()
    );
    let _ = writeln!(out, "Avg weekly increase: {:.1} min", report.avg_weekly_increase);
    if let Some(c) = report.weekly_consistency_pct {
        let _ = writeln!(out, "Weekly consistency: {c:.0}%");
    }
    for w in &report.weekly {
        let _ = writeln!(
            out,
            "  Week {}: run {} min, total {} min, {:.2} km",
            w.week,
            fmt_min(w.run_time),
            fmt_min(w.total_time),
            w.distance_km
        );
    }
    out
}

pub fn render_comparison(c: &ModelComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- {} vs {} ---", c.model.as_str(), c.baseline.as_str());
    let _ = writeln!(
        out,
        "Total distance: {:.2} km (baseline {:.2} km, diff {:.2} km{})",
        c.total_distance_km,
        c.baseline_total_distance_km,
        c.difference_km,
        c.difference_pct.map(|p| format!(", {p:.1}%")).unwrap_or_default()
    );
    let _ = writeln!(
        out,
        "Final week running: {:.2} km ({})",
        c.final_week_run_distance_km,
        if c.meets_race_distance { "reaches 5K" } else { "short of 5K" }
    );
    out
}

pub fn render_history(history: &[(u32, WeeklyLog)]) -> String {
    if history.is_empty() {
        return "📝 No training history yet.".to_string();
    }
    let mut out = String::new();
    for (week, log) in history {
        let mut parts = Vec::new();
        if let Some(p) = log.pace {
            parts.push(format!("pace {p:.2} min/km"));
        }
        if let Some(d) = log.distance {
            parts.push(format!("{d:.2} km"));
        }
        if let Some(r) = log.recovery {
            parts.push(format!("recovery {r}/10"));
        }
        if log.skipped {
            parts.push("skipped sessions".to_string());
        }
        let _ = writeln!(out, "Week {week} ({}): {}", log.logged_at, parts.join(", "));
        if !log.comments.is_empty() {
            let _ = writeln!(out, "  💬 {}", log.comments);
        }
    }
    out
}

pub fn render_telemetry(comparisons: &[SessionComparison], summary: Option<&TelemetrySummary>) -> String {
    let mut out = String::new();
    for c in comparisons {
        let _ = writeln!(out, "Week {} Session {}", c.week, c.day);
        match &c.planned {
            Some(p) => {
                let _ = writeln!(
                    out,
                    "  planned: {}/{} × {} = {} min, ~{:.2} km",
                    fmt_min(p.run_minutes),
                    fmt_min(p.walk_minutes),
                    p.sets,
                    fmt_min(p.total_workout_time),
                    p.expected_distance_km
                );
            }
            None => {
                let _ = writeln!(out, "  planned: (no matching session)");
            }
        }
        if let Some(m) = c.actual_minutes {
            let _ = writeln!(out, "  actual: {m:.1} min");
        }
        if let Some(d) = c.actual_distance_km {
            let _ = writeln!(out, "  distance: {d:.2} km");
        }
        if let Some(zone) = c.hr_zone {
            let _ = writeln!(out, "  HR zone: {}", zone.describe());
        }
        for note in &c.notes {
            let _ = writeln!(out, "  ⚠️ {note}");
        }
    }
    if let Some(s) = summary {
        let _ = writeln!(
            out,
            "Average HR {:.0}, max session HR {}: {}",
            s.avg_hr,
            s.max_session_hr,
            s.assessment.describe()
        );
    }
    out
}
