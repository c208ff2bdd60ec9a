use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::intervals::PLAN_WEEKS;
use crate::models::{DayName, IntervalTable, SESSIONS_PER_WEEK};
use crate::sessions::week_of;
use crate::sets::SetCountTable;

/// 1.0 → "1", 1.5 → "1.5"
pub fn fmt_min(x: f64) -> String {
    let s = format!("{x:.1}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
}

pub fn weekly_focus(week: u32) -> Option<&'static str> {
    let focus = match week {
        1 => "Building base fitness with walk/run intervals + strength foundation",
        2 => "Increasing running duration, reducing walk breaks + bodyweight training",
        3 => "Continuous running for longer periods + plyometric power",
        4 => "Building endurance and consistency + functional strength",
        5 => "Speed work introduction with structured intervals + circuit training",
        6 => "Peak training with longer intervals + explosive power",
        7 => "Tapering and race preparation + mobility/recovery",
        _ => return None,
    };
    Some(focus)
}

fn run_zone(day: DayName) -> &'static str {
    match day {
        DayName::Tue => "140-160",
        _ => "130-150",
    }
}

fn session_line(day: DayName, run_min: f64, walk_min: f64, sets: u32) -> String {
    let zone = run_zone(day);
    if walk_min == 0.0 {
        format!(
            "{}: Continuous run ({} min) [HR: {zone} bpm]",
            day.as_str(),
            run_min.trunc() as u32
        )
    } else {
        format!(
            "{}: Run/walk intervals ({} min run / {} min walk × {sets}) [HR: {zone}/100-120 bpm]",
            day.as_str(),
            fmt_min(run_min),
            fmt_min(walk_min)
        )
    }
}

/// Tekstplan per uke: treningsdager fra tabellen + faste hvile-/styrkedager.
/// Bruker settabellen kalleren velger (ukesoversikten har historisk brukt V1).
pub fn weekly_overview(table: &IntervalTable, set_table: SetCountTable) -> BTreeMap<u32, Vec<String>> {
    let mut plan = BTreeMap::new();
    let weeks = (table.len() as u32).div_ceil(SESSIONS_PER_WEEK);

    for week in 1..=weeks {
        let first = (week - 1) * SESSIONS_PER_WEEK + 1;
        let mut lines = Vec::new();

        for (offset, day) in [DayName::Mon, DayName::Tue, DayName::Thu].into_iter().enumerate() {
            let idx = first + offset as u32;
            if let Some(step) = table.step(idx) {
                let sets = set_table.compute_sets(table, idx, step.run_minutes, week_of(idx));
                lines.push(session_line(day, step.run_minutes, step.walk_minutes, sets));
            }
            if day == DayName::Tue {
                lines.push("Wed: Rest or strength training (squats, lunges, planks, push-ups)".to_string());
            }
        }
        lines.push("Fri: Rest or yoga/mobility work".to_string());
        lines.push("Weekend: Rest".to_string());
        if week == PLAN_WEEKS {
            lines.push("Sun: RACE DAY - 5K race! Good luck and race smart 🎉".to_string());
        }

        plan.insert(week, lines);
    }
    plan
}

/// Gjenstående uker etter `current_week`.
pub fn remaining_plan(table: &IntervalTable, set_table: SetCountTable, current_week: u32) -> String {
    if current_week >= PLAN_WEEKS {
        return "🎉 Congratulations! You've completed all 7 weeks!\nYou're ready for your 5K race! 🏃‍♂️💨"
            .to_string();
    }

    let plan = weekly_overview(table, set_table);
    let mut out = String::new();
    let _ = writeln!(out, "📅 Remaining Training Plan (Week {} to {PLAN_WEEKS}):", current_week + 1);
    let _ = writeln!(out, "{}", "=".repeat(60));

    for (week, lines) in plan.range(current_week + 1..) {
        let _ = writeln!(out, "\n🗓️  Week {week}");
        let _ = writeln!(out, "{}", "-".repeat(20));
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
        if let Some(focus) = weekly_focus(*week) {
            let _ = writeln!(out, "  🎯 Focus: {focus}");
        }
    }
    out
}
