use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::Value;

use crate::advice;
use crate::error::{PlanError, Result};
use crate::metrics;
use crate::models::{weeks_sorted, LogBook, WeeklyLog};

pub const DEFAULT_LOG_FILE: &str = "training_log.json";
pub const LOGGED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Én uke slik den ligger på disk.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StoredWeek {
    Parsed(WeeklyLog),
    Unreadable(Value),
}

/// Inndata for én ukeslogg, før validering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyLogInput {
    pub pace: Option<f64>,
    pub distance: Option<f64>,
    pub recovery: Option<u8>,
    pub skipped: bool,
    pub comments: String,
}

impl WeeklyLogInput {
    /// Validerer alt før noe skrives; feil gir ingen delvis logg.
    pub fn validate(&self) -> Result<()> {
        if let Some(p) = self.pace {
            if !p.is_finite() || p <= 0.0 {
                return Err(PlanError::invalid("pace", format!("{p} must be a positive number of min/km")));
            }
        }
        if let Some(d) = self.distance {
            if !d.is_finite() || d <= 0.0 {
                return Err(PlanError::invalid("distance", format!("{d} must be a positive number of km")));
            }
        }
        if let Some(r) = self.recovery {
            if !(1..=10).contains(&r) {
                return Err(PlanError::invalid("recovery", format!("{r} is outside 1-10")));
            }
        }
        Ok(())
    }
}

/// Flat JSON-logg: `{ "<uke>": WeeklyLog, ... }`. Én skriver om gangen.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leser loggen. Manglende eller ødelagt fil gir tom logg (med advarsel),
    /// aldri en feil til kalleren. Uker som ikke kan tolkes hoppes over hver
    /// for seg; resten av loggen beholdes.
    pub fn load_logs(&self) -> LogBook {
        let book: LogBook = self
            .load_stored()
            .into_iter()
            .filter_map(|(week, stored)| match stored {
                StoredWeek::Parsed(entry) => Some((week, entry)),
                StoredWeek::Unreadable(_) => None,
            })
            .collect();
        log::debug!("📂 Logg lastet fra {} ({} uker)", self.path.display(), book.len());
        book
    }

    /// Hver uke tolkes for seg. Tom ved manglende eller ødelagt fil.
    fn load_stored(&self) -> BTreeMap<String, StoredWeek> {
        if !self.path.exists() {
            return BTreeMap::new();
        }
        let raw = match read_raw_log_book(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("⚠️ Kunne ikke laste logg fra {}: {e}", self.path.display());
                metrics::global().log_load_fallback_total.inc();
                return BTreeMap::new();
            }
        };

        raw.into_iter()
            .map(|(week, value)| {
                let stored = match serde_path_to_error::deserialize::<_, WeeklyLog>(&value) {
                    Ok(entry) => StoredWeek::Parsed(entry),
                    Err(e) => {
                        log::warn!(
                            "⚠️ Hopper over uke '{week}' i {} ({}): {}",
                            self.path.display(),
                            e.path(),
                            e.inner()
                        );
                        metrics::global().log_entries_skipped_total.inc();
                        StoredWeek::Unreadable(value)
                    }
                };
                (week, stored)
            })
            .collect()
    }

    /// Skriver hele loggen (pretty JSON) via temp-fil + rename, så en avbrutt
    /// skriving ikke ødelegger forrige gyldige fil.
    pub fn save_logs(&self, logs: &LogBook) -> Result<()> {
        write_json_atomic(&self.path, logs)?;
        metrics::global().log_writes_total.inc();
        log::info!("✅ Logg lagret til {} ({} uker)", self.path.display(), logs.len());
        Ok(())
    }

    /// Upsert av én uke, stemplet med lokal tid.
    pub fn log_week(&self, week: u32, input: WeeklyLogInput) -> Result<WeeklyLog> {
        if week == 0 {
            return Err(PlanError::invalid("week", "weeks are numbered from 1"));
        }
        input.validate()?;

        let entry = WeeklyLog {
            pace: input.pace,
            distance: input.distance,
            recovery: input.recovery,
            skipped: input.skipped,
            comments: input.comments,
            logged_at: Local::now().format(LOGGED_AT_FORMAT).to_string(),
        };

        // uker som ikke kunne tolkes skrives tilbake uendret
        let mut stored = self.load_stored();
        stored.insert(week.to_string(), StoredWeek::Parsed(entry.clone()));
        write_json_atomic(&self.path, &stored)?;
        metrics::global().log_writes_total.inc();
        log::info!("✅ Uke {week} lagret til {}", self.path.display());
        Ok(entry)
    }

    /// Høyeste loggede uke (0 uten logger). Hull i rekken oppdages ikke.
    pub fn get_current_week(&self) -> u32 {
        current_week(&self.load_logs())
    }

    pub fn adjust_plan(&self) -> BTreeMap<u32, String> {
        advice::adjust_plan(&self.load_logs())
    }

    pub fn predict_5k(&self) -> String {
        advice::predict_5k(&self.load_logs())
    }

    /// Logger sortert på uke.
    pub fn history(&self) -> Vec<(u32, WeeklyLog)> {
        let logs = self.load_logs();
        weeks_sorted(&logs)
            .into_iter()
            .map(|(w, l)| (w, l.clone()))
            .collect()
    }

    /// Eksporterer loggen. Uten filnavn: `training_export_YYYYMMDD_HHMMSS.json`.
    pub fn export_logs(&self, target: Option<&Path>) -> Result<PathBuf> {
        let target = match target {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(format!(
                "training_export_{}.json",
                Local::now().format("%Y%m%d_%H%M%S")
            )),
        };
        let logs = self.load_logs();
        write_json_atomic(&target, &logs)?;
        log::info!("✅ Logg eksportert til {}", target.display());
        Ok(target)
    }

    /// Sletter loggfila. `Ok(false)` når det ikke fantes noen fil.
    pub fn reset(&self) -> Result<bool> {
        if !self.path.exists() {
            log::info!("ℹ️ Ingen loggfil å slette ({})", self.path.display());
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|e| PlanError::io(&self.path, e))?;
        log::info!("🗑️ Loggfil {} slettet", self.path.display());
        Ok(true)
    }
}

pub fn current_week(logs: &LogBook) -> u32 {
    weeks_sorted(logs).last().map(|(w, _)| *w).unwrap_or(0)
}

fn read_raw_log_book(path: &Path) -> Result<BTreeMap<String, Value>> {
    let contents = fs::read_to_string(path).map_err(|e| PlanError::io(path, e))?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    serde_path_to_error::deserialize(&mut de).map_err(|source| PlanError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON til `<fil>.tmp`, deretter rename over målet.
pub(crate) fn write_json_atomic<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, json).map_err(|e| PlanError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(PlanError::io(path, e));
    }
    Ok(())
}
