//! Storage backend for experiment tracking
//!
//! Persists run records, artifacts, and the model registry under a root
//! directory. One directory per run, JSON throughout.

use crate::error::{Result, WinepressError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::tracker::Run;

/// Storage backend contract
pub trait StorageBackend {
    /// Persist a run record (initial write and every finalize)
    fn save_run(&self, run: &Run) -> Result<()>;

    /// Write an artifact blob for a run; returns its run-relative path
    fn write_artifact(&self, run_id: &str, name: &str, bytes: &[u8]) -> Result<String>;

    /// Register a model version pointing at a run artifact; returns the version
    fn register_model(&self, name: &str, run_id: &str, artifact: &str) -> Result<u32>;

    /// Whether the store root can be created/written
    fn is_available(&self) -> bool;
}

/// One entry in a registered model's version list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredVersion {
    pub version: u32,
    pub run_id: String,
    pub artifact: String,
    pub created_at: DateTime<Utc>,
}

/// Directory-backed store: `<root>/<run_id>/run.json`,
/// `<root>/<run_id>/artifacts/...`, `<root>/registry/<name>/versions.json`.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root.join(run_id)
    }

    fn registry_file(&self, name: &str) -> PathBuf {
        self.root.join("registry").join(name).join("versions.json")
    }

    /// Read a persisted run record back from the store
    pub fn load_run(&self, run_id: &str) -> Result<Run> {
        let path = self.run_dir(run_id).join("run.json");
        let json = fs::read_to_string(&path).map_err(|e| {
            WinepressError::TrackingError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read a registered model's version list; empty if never registered
    pub fn load_registered_versions(&self, name: &str) -> Result<Vec<RegisteredVersion>> {
        let path = self.registry_file(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl StorageBackend for LocalFileStore {
    fn save_run(&self, run: &Run) -> Result<()> {
        let dir = self.run_dir(&run.run_id);
        fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(run)?;
        fs::write(dir.join("run.json"), json)?;
        Ok(())
    }

    fn write_artifact(&self, run_id: &str, name: &str, bytes: &[u8]) -> Result<String> {
        let rel = PathBuf::from("artifacts").join(name);
        let path = self.run_dir(run_id).join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(rel.to_string_lossy().replace('\\', "/"))
    }

    fn register_model(&self, name: &str, run_id: &str, artifact: &str) -> Result<u32> {
        let mut versions = self.load_registered_versions(name)?;
        let version = versions.len() as u32 + 1;
        versions.push(RegisteredVersion {
            version,
            run_id: run_id.to_string(),
            artifact: artifact.to_string(),
            created_at: Utc::now(),
        });

        let path = self.registry_file(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&versions)?)?;
        Ok(version)
    }

    fn is_available(&self) -> bool {
        fs::create_dir_all(&self.root).is_ok()
    }
}
