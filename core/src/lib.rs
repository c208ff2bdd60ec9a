pub mod advice;
pub mod cli;
pub mod distance;
pub mod error;
pub mod intervals;
pub mod metrics;
pub mod models;
pub mod overview;
pub mod plan_store;
pub mod progression;
pub mod py;
pub mod sessions;
pub mod sets;
pub mod storage;
pub mod telemetry;

pub use advice::{adjust_plan, predict_5k, predict_race, RacePrediction};
pub use distance::{
    compute_distances, parse_pace, session_distance, DistanceModel, PaceSettings, RoundTo,
    SessionDistance,
};
pub use error::{PlanError, Result};
pub use intervals::{DEFAULT_PROGRESSION, PLAN_WEEKS};
pub use models::{
    DayName, HrZones, IntervalStep, IntervalTable, LogBook, SessionRecord, WeeklyLog, WorkoutType,
    SESSIONS_PER_WEEK,
};
pub use overview::{remaining_plan, weekly_overview};
pub use plan_store::{PlanStore, SavedPlan};
pub use progression::{analyze_progression, compare_models, ModelComparison, ProgressionReport};
pub use sessions::{
    append_session, generate_default_sessions, generate_sessions, recompute, SessionOverrides,
    DEFAULT_SESSION_COUNT,
};
pub use sets::{compute_sets, SetCountTable};
pub use storage::{LogStore, WeeklyLogInput, DEFAULT_LOG_FILE};
pub use telemetry::{compare_sessions, load_observed, parse_observed, summarize, ObservedSession};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn runplan_core(_py: Python, m: &PyModule) -> PyResult<()> {
    py::register(m)
}
