use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::SessionRecord;
use crate::storage::write_json_atomic;

const DELETED_DIR: &str = "deleted_plans";

/// Lagret egendefinert plan (redigert i dashboardet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub name: String,
    pub created: String,
    pub sessions: Vec<SessionRecord>,
}

/// Katalog med én JSON-fil per plan. Sletting flytter fila til `deleted_plans/`.
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn deleted_dir(&self) -> PathBuf {
        self.dir.join(DELETED_DIR)
    }

    fn ensure_dirs(&self) -> Result<()> {
        for d in [self.dir.clone(), self.deleted_dir()] {
            fs::create_dir_all(&d).map_err(|e| PlanError::io(&d, e))?;
        }
        Ok(())
    }

    pub fn file_name_for(name: &str) -> String {
        format!("{}.json", name.trim().replace(' ', "_"))
    }

    pub fn save(&self, name: &str, sessions: &[SessionRecord]) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(PlanError::invalid("plan_name", "must not be empty"));
        }
        self.ensure_dirs()?;

        let plan = SavedPlan {
            name: name.to_string(),
            created: Local::now().to_rfc3339(),
            sessions: sessions.to_vec(),
        };
        let path = self.dir.join(Self::file_name_for(name));
        write_json_atomic(&path, &plan)?;
        log::info!("✅ Plan '{}' lagret til {}", name, path.display());
        Ok(path)
    }

    pub fn load(&self, file_name: &str) -> Result<SavedPlan> {
        let path = self.dir.join(file_name);
        let contents = fs::read_to_string(&path).map_err(|e| PlanError::io(&path, e))?;
        let mut de = serde_json::Deserializer::from_str(&contents);
        serde_path_to_error::deserialize(&mut de).map_err(|source| PlanError::Json { path, source })
    }

    /// JSON-filer i katalogen, sortert. Tom liste om katalogen mangler.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|e| PlanError::io(&self.dir, e))?;
        let mut plans: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|n| n.ends_with(".json"))
            .collect();
        plans.sort();
        Ok(plans)
    }

    /// Flytter planen til `deleted_plans/<navn>_deleted_<tid>.json`.
    pub fn delete(&self, plan_name: &str) -> Result<PathBuf> {
        let file_name = if plan_name.ends_with(".json") {
            plan_name.to_string()
        } else {
            format!("{plan_name}.json")
        };
        let source = self.dir.join(&file_name);
        if !source.exists() {
            return Err(PlanError::io(
                &source,
                std::io::Error::new(std::io::ErrorKind::NotFound, "plan not found"),
            ));
        }
        self.ensure_dirs()?;

        let base = file_name.trim_end_matches(".json");
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let dest = self.deleted_dir().join(format!("{base}_deleted_{stamp}.json"));

        fs::rename(&source, &dest).map_err(|e| PlanError::io(&source, e))?;
        log::info!("🗑️ Plan flyttet til {}", dest.display());
        Ok(dest)
    }
}
