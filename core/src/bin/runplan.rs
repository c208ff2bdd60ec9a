use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use runplan_core::cli::{
    render_comparison, render_history, render_progression, render_sessions, render_telemetry,
};
use runplan_core::distance::{compute_distances, parse_pace, DistanceModel, PaceSettings};
use runplan_core::models::IntervalTable;
use runplan_core::overview::{remaining_plan, weekly_focus, weekly_overview};
use runplan_core::progression::{analyze_progression, compare_models};
use runplan_core::sessions::{generate_sessions, DEFAULT_SESSION_COUNT};
use runplan_core::sets::SetCountTable;
use runplan_core::storage::{LogStore, WeeklyLogInput, DEFAULT_LOG_FILE};
use runplan_core::telemetry::{compare_sessions, load_observed, summarize};
use runplan_core::{metrics, PLAN_WEEKS};

/// 7-week 5K interval plan: sessions, distances, training log and advice.
#[derive(Parser, Debug)]
#[command(name = "runplan")]
#[command(version)]
struct Args {
    /// Training log file. Can also be set via RUNPLAN_LOG_FILE.
    #[arg(long, value_name = "FILE", env = "RUNPLAN_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Print prometheus counters after the command.
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Weekly plan overview (remaining weeks, or one week).
    Plan {
        #[arg(long)]
        week: Option<u32>,
        #[arg(long, default_value = "v1", value_parser = parse_set_table)]
        set_table: SetCountTable,
    },
    /// Expanded session table.
    Sessions {
        #[arg(long, default_value_t = DEFAULT_SESSION_COUNT)]
        count: u32,
        #[arg(long, default_value = "v2", value_parser = parse_set_table)]
        set_table: SetCountTable,
        /// Add distances with this model (constant, fatigue4, fatigue5).
        #[arg(long)]
        model: Option<DistanceModel>,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Log (or overwrite) a week's results.
    Log {
        #[arg(long)]
        week: u32,
        /// Average pace, e.g. 6:30 or 6.5 (min/km).
        #[arg(long)]
        pace: Option<String>,
        #[arg(long)]
        distance: Option<f64>,
        /// Recovery 1-10.
        #[arg(long)]
        recovery: Option<u8>,
        #[arg(long)]
        skipped: bool,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Suggestions for upcoming weeks.
    Adjust,
    /// 5K race time prediction.
    Predict,
    /// Logged weeks.
    History,
    /// Copy the log to a file.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete the training log.
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Compare observed sessions (OCR JSON) with the plan.
    Compare {
        #[arg(long, value_name = "FILE")]
        telemetry: PathBuf,
        #[arg(long, default_value_t = DEFAULT_SESSION_COUNT)]
        count: u32,
    },
    /// Progression analysis with a distance model.
    Progression {
        #[arg(long, default_value_t = DEFAULT_SESSION_COUNT)]
        count: u32,
        #[arg(long, default_value = "fatigue5")]
        model: DistanceModel,
        #[arg(long, default_value = "constant")]
        baseline: DistanceModel,
        #[arg(long)]
        run_pace: Option<String>,
        #[arg(long)]
        walk_pace: Option<String>,
        #[arg(long)]
        fixed_pace: bool,
    },
}

fn parse_set_table(s: &str) -> std::result::Result<SetCountTable, String> {
    match s.to_ascii_lowercase().as_str() {
        "v1" => Ok(SetCountTable::V1),
        "v2" => Ok(SetCountTable::V2),
        other => Err(format!("unknown set table '{other}' (expected v1 or v2)")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let store = LogStore::new(&args.log_file);
    let table = IntervalTable::default();

    match args.command {
        Command::Plan { week, set_table } => match week {
            Some(w) => {
                let plan = weekly_overview(&table, set_table);
                let lines = plan
                    .get(&w)
                    .with_context(|| format!("week {w} is outside the {PLAN_WEEKS}-week plan"))?;
                println!("🗓️  Week {w}");
                for line in lines {
                    println!("  {line}");
                }
                if let Some(focus) = weekly_focus(w) {
                    println!("  🎯 Focus: {focus}");
                }
            }
            None => print!("{}", remaining_plan(&table, set_table, store.get_current_week())),
        },

        Command::Sessions { count, set_table, model, json } => {
            let sessions = generate_sessions(&table, set_table, count)?;
            let distances = model.map(|m| compute_distances(&sessions, m, &PaceSettings::default()));
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else {
                print!("{}", render_sessions(&sessions, distances.as_deref()));
            }
        }

        Command::Log { week, pace, distance, recovery, skipped, comments } => {
            let pace = pace
                .as_deref()
                .map(parse_pace)
                .transpose()
                .context("could not parse --pace")?;
            let input = WeeklyLogInput { pace, distance, recovery, skipped, comments };
            store
                .log_week(week, input)
                .with_context(|| format!("failed to log week {week}"))?;
            println!("✅ Week {week} logged to {}", store.path().display());
        }

        Command::Adjust => {
            let adjustments = store.adjust_plan();
            if adjustments.is_empty() {
                println!("No adjustments suggested. Keep following the plan!");
            }
            for (week, text) in adjustments {
                println!("Week {week}: {text}");
            }
        }

        Command::Predict => println!("{}", store.predict_5k()),

        Command::History => print!("{}", render_history(&store.history())),

        Command::Export { output } => {
            let path = store.export_logs(output.as_deref())?;
            println!("✅ Exported to {}", path.display());
        }

        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to delete {} without --yes", store.path().display());
            }
            if store.reset()? {
                println!("🗑️ Training log deleted");
            } else {
                println!("No training log to delete");
            }
        }

        Command::Compare { telemetry, count } => {
            let observed = load_observed(&telemetry)
                .with_context(|| format!("failed to read telemetry from {}", telemetry.display()))?;
            let planned = generate_sessions(&table, SetCountTable::V2, count)?;
            let comparisons = compare_sessions(&observed, &planned);
            print!("{}", render_telemetry(&comparisons, summarize(&observed).as_ref()));
        }

        Command::Progression { count, model, baseline, run_pace, walk_pace, fixed_pace } => {
            let run = run_pace.as_deref().map(parse_pace).transpose().context("--run-pace")?;
            let walk = walk_pace.as_deref().map(parse_pace).transpose().context("--walk-pace")?;
            let settings = PaceSettings::from_paces(run, walk, fixed_pace);
            let sessions = generate_sessions(&table, SetCountTable::V2, count)?;
            let distances = compute_distances(&sessions, model, &settings);
            if let Some(report) = analyze_progression(&sessions, &distances) {
                print!("{}", render_progression(&report));
            }
            print!("{}", render_comparison(&compare_models(&sessions, model, baseline, &settings)));
        }
    }

    if args.metrics {
        print!("{}", metrics::global().gather_text());
    }
    Ok(())
}
