//! JSON inn / JSON ut for Python-dashboardet.
//!
//! `*_json`-funksjonene er rene Rust og kan testes uten Python. Selve
//! pyo3-innpakningen kompileres bare med `--features python`.

use serde::{Deserialize, Serialize};
use serde_json as json;
use serde_path_to_error as spte;

use crate::distance::{compute_distances, DistanceModel, PaceSettings};
use crate::models::{IntervalTable, LogBook, SessionRecord};
use crate::progression::{analyze_progression, compare_models};
use crate::sessions::{generate_sessions, recompute, SessionOverrides, DEFAULT_SESSION_COUNT};
use crate::sets::SetCountTable;
use crate::telemetry::{compare_sessions, parse_observed, summarize};
use crate::{advice, sessions};

// ──────────────────────────────────────────────────────────────────────────────
// Felles
// ──────────────────────────────────────────────────────────────────────────────

fn parse<'a, T: Deserialize<'a>>(what: &str, json_in: &'a str) -> Result<T, String> {
    let mut de = json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| format!("parse error ({what}) at {}: {}", e.path(), e.inner()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    json::to_string(value).map_err(|e| format!("serialize error: {e}"))
}

fn default_count() -> u32 {
    DEFAULT_SESSION_COUNT
}

/// Distanse-innstillinger slik dashboardet sender dem (tempo i min/km).
#[derive(Debug, Deserialize)]
struct PaceIn {
    #[serde(default, alias = "run_pace")]
    run_pace_min_per_km: Option<f64>,
    #[serde(default, alias = "walk_pace")]
    walk_pace_min_per_km: Option<f64>,
    #[serde(default)]
    fixed_pace: bool,
}

impl PaceIn {
    /// Manglende tempo gir standardfart (12 km/t, 100 m/min).
    fn settings(&self) -> PaceSettings {
        PaceSettings::from_paces(self.run_pace_min_per_km, self.walk_pace_min_per_km, self.fixed_pace)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// JSON-API
// ──────────────────────────────────────────────────────────────────────────────

/// `{ "count"?: u32, "set_table"?: "v1"|"v2" }` → `[SessionRecord]`
pub fn generate_sessions_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        #[serde(default = "default_count")]
        count: u32,
        #[serde(default)]
        set_table: SetCountTable,
    }
    let parsed: In = parse("GenerateIn", json_in)?;
    let out = generate_sessions(&IntervalTable::default(), parsed.set_table, parsed.count)
        .map_err(|e| e.to_string())?;
    to_json(&out)
}

/// `{ "sessions": [...], "model"?: "...", "run_pace"?, "walk_pace"?, "fixed_pace"? }`
pub fn compute_distances_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        sessions: Vec<SessionRecord>,
        #[serde(default)]
        model: DistanceModel,
        #[serde(flatten)]
        pace: PaceIn,
    }
    let parsed: In = parse("DistancesIn", json_in)?;
    let out = compute_distances(&parsed.sessions, parsed.model, &parsed.pace.settings());
    to_json(&out)
}

/// `{ "session": SessionRecord, "overrides": { run_minutes?, walk_minutes?, sets? } }`
pub fn recompute_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        session: SessionRecord,
        #[serde(default)]
        overrides: SessionOverrides,
    }
    let parsed: In = parse("RecomputeIn", json_in)?;
    let out = recompute(&parsed.session, &parsed.overrides).map_err(|e| e.to_string())?;
    to_json(&out)
}

/// `[SessionRecord]` → ny økt lagt til på slutten.
pub fn append_session_json(json_in: &str) -> Result<String, String> {
    let existing: Vec<SessionRecord> = parse("AppendIn", json_in)?;
    to_json(&sessions::append_session(&existing))
}

/// `{ "sessions": [...], "model"?: "...", "baseline"?: "...", pace... }`
/// → `{ "report": ProgressionReport|null, "comparison": ModelComparison }`
pub fn progression_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        sessions: Vec<SessionRecord>,
        #[serde(default = "fatigue_default")]
        model: DistanceModel,
        #[serde(default)]
        baseline: DistanceModel,
        #[serde(flatten)]
        pace: PaceIn,
    }
    fn fatigue_default() -> DistanceModel {
        DistanceModel::FatigueBands5Tier
    }

    let parsed: In = parse("ProgressionIn", json_in)?;
    let settings = parsed.pace.settings();
    let distances = compute_distances(&parsed.sessions, parsed.model, &settings);

    let out = json::json!({
        "report": analyze_progression(&parsed.sessions, &distances),
        "comparison": compare_models(&parsed.sessions, parsed.model, parsed.baseline, &settings),
    });
    Ok(out.to_string())
}

/// Loggbok (`{ "<uke>": WeeklyLog }`) → `{ adjustments, prediction, prediction_text }`
pub fn advice_json(json_in: &str) -> Result<String, String> {
    let logs: LogBook = parse("LogBook", json_in)?;
    let out = json::json!({
        "adjustments": advice::adjust_plan(&logs),
        "prediction": advice::predict_race(&logs),
        "prediction_text": advice::predict_5k(&logs),
    });
    Ok(out.to_string())
}

/// `{ "observed": [...], "sessions"?: [...] }` → `{ comparisons, summary }`.
/// Uten `sessions` sammenlignes det mot standardplanen.
pub fn compare_telemetry_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        observed: json::Value,
        #[serde(default)]
        sessions: Option<Vec<SessionRecord>>,
    }
    let parsed: In = parse("TelemetryIn", json_in)?;
    let observed = parse_observed(&parsed.observed.to_string()).map_err(|e| e.to_string())?;
    let planned = match parsed.sessions {
        Some(s) => s,
        None => sessions::generate_default_sessions(DEFAULT_SESSION_COUNT).map_err(|e| e.to_string())?,
    };

    let out = json::json!({
        "comparisons": compare_sessions(&observed, &planned),
        "summary": summarize(&observed),
    });
    Ok(out.to_string())
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-innpakning
// ──────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "python")]
mod bindings {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::wrap_pyfunction;

    #[pyfunction]
    fn generate_sessions_json(json_in: &str) -> PyResult<String> {
        super::generate_sessions_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn compute_distances_json(json_in: &str) -> PyResult<String> {
        super::compute_distances_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn recompute_json(json_in: &str) -> PyResult<String> {
        super::recompute_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn append_session_json(json_in: &str) -> PyResult<String> {
        super::append_session_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn progression_json(json_in: &str) -> PyResult<String> {
        super::progression_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn advice_json(json_in: &str) -> PyResult<String> {
        super::advice_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn compare_telemetry_json(json_in: &str) -> PyResult<String> {
        super::compare_telemetry_json(json_in).map_err(PyValueError::new_err)
    }

    #[pyfunction]
    fn metrics_text() -> String {
        crate::metrics::global().gather_text()
    }

    pub fn register(m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(generate_sessions_json, m)?)?;
        m.add_function(wrap_pyfunction!(compute_distances_json, m)?)?;
        m.add_function(wrap_pyfunction!(recompute_json, m)?)?;
        m.add_function(wrap_pyfunction!(append_session_json, m)?)?;
        m.add_function(wrap_pyfunction!(progression_json, m)?)?;
        m.add_function(wrap_pyfunction!(advice_json, m)?)?;
        m.add_function(wrap_pyfunction!(compare_telemetry_json, m)?)?;
        m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use bindings::register;
