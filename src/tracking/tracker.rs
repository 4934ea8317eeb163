//! Run tracker
//!
//! [`ExperimentTracker`] owns the store; [`ActiveRun`] is the scoped handle
//! for one run. Dropping an unfinished handle finalizes the run as `Failed`,
//! so the record is persisted on every exit path, including early returns
//! from `?`.

use crate::error::Result;
use crate::model::ElasticNet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

use super::signature::ModelSignature;
use super::storage::{LocalFileStore, StorageBackend};

/// Spool directory for runs whose URI points at a remote store
const REMOTE_SPOOL_DIR: &str = "./mlruns";

/// Parsed tracking URI.
///
/// `file:<path>`, `file://<path>`, or a bare path select a local file store.
/// Any other scheme keeps its runs in a local spool directory but marks the
/// store as remote, which is what gates model registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingUri {
    raw: String,
    scheme: String,
    path: PathBuf,
}

impl TrackingUri {
    pub fn parse(raw: &str) -> Self {
        let (scheme, rest) = match raw.split_once("://") {
            Some((s, rest)) if !s.is_empty() => (s.to_string(), rest.to_string()),
            _ => match raw.split_once(':') {
                Some((s, rest)) if s.len() > 1 && s.chars().all(|c| c.is_ascii_alphabetic()) => {
                    (s.to_string(), rest.to_string())
                }
                _ => ("file".to_string(), raw.to_string()),
            },
        };

        let path = if scheme == "file" {
            PathBuf::from(if rest.is_empty() { "." } else { &rest })
        } else {
            PathBuf::from(REMOTE_SPOOL_DIR)
        };

        Self {
            raw: raw.to_string(),
            scheme,
            path,
        }
    }

    /// URI scheme, `file` for bare paths
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Whether the store is a simple local file store
    pub fn is_local_file(&self) -> bool {
        self.scheme == "file"
    }

    /// Directory the store writes under
    pub fn store_root(&self) -> &PathBuf {
        &self.path
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Lifecycle state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Finished,
    Failed,
}

/// A recorded unit of experiment execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub run_id: String,
    pub run_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RunStatus,
    pub params: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, f64>,
    pub artifacts: Vec<String>,
}

/// Tracking client bound to one store
pub struct ExperimentTracker {
    uri: TrackingUri,
    store: LocalFileStore,
}

impl ExperimentTracker {
    pub fn new(uri: &str) -> Self {
        let uri = TrackingUri::parse(uri);
        let store = LocalFileStore::new(uri.store_root());
        Self { uri, store }
    }

    pub fn uri(&self) -> &TrackingUri {
        &self.uri
    }

    pub fn store(&self) -> &LocalFileStore {
        &self.store
    }

    /// Open a new run. The record is persisted immediately in `Running`
    /// state and re-persisted on finalize.
    pub fn start_run(&self, name: &str) -> Result<ActiveRun<'_>> {
        let run = Run {
            run_id: Uuid::new_v4().to_string(),
            run_name: name.to_string(),
            start_time: Utc::now(),
            end_time: None,
            status: RunStatus::Running,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            artifacts: Vec::new(),
        };
        self.store.save_run(&run)?;
        tracing::info!(run_id = %run.run_id, uri = %self.uri.as_str(), "started tracking run");

        Ok(ActiveRun {
            tracker: self,
            run,
            finished: false,
        })
    }
}

/// Scoped handle for an open run
pub struct ActiveRun<'a> {
    tracker: &'a ExperimentTracker,
    run: Run,
    finished: bool,
}

impl ActiveRun<'_> {
    pub fn run_id(&self) -> &str {
        &self.run.run_id
    }

    /// Record a key/value parameter
    pub fn log_param(&mut self, key: &str, value: impl ToString) {
        self.run.params.insert(key.to_string(), value.to_string());
    }

    /// Record a scalar metric
    pub fn log_metric(&mut self, key: &str, value: f64) {
        self.run.metrics.insert(key.to_string(), value);
    }

    /// Serialize the model with its signature into the run's artifacts.
    ///
    /// When `registered_name` is given the artifact is also entered into the
    /// model registry; the caller decides that based on the URI scheme.
    pub fn log_model(
        &mut self,
        model: &ElasticNet,
        signature: &ModelSignature,
        registered_name: Option<&str>,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ModelArtifact<'m> {
            model: &'m ElasticNet,
            signature: &'m ModelSignature,
        }

        let bytes = serde_json::to_vec_pretty(&ModelArtifact { model, signature })?;
        let artifact = self
            .tracker
            .store
            .write_artifact(&self.run.run_id, "model/model.json", &bytes)?;
        self.run.artifacts.push(artifact.clone());

        if let Some(name) = registered_name {
            let version = self
                .tracker
                .store
                .register_model(name, &self.run.run_id, &artifact)?;
            tracing::info!(model = name, version, "registered model");
        }

        Ok(())
    }

    fn finalize(&mut self, status: RunStatus) -> Result<()> {
        self.run.status = status;
        self.run.end_time = Some(Utc::now());
        self.finished = true;
        self.tracker.store.save_run(&self.run)
    }

    /// Finalize the run as `Finished` and persist it
    pub fn finish(mut self) -> Result<Run> {
        self.finalize(RunStatus::Finished)?;
        Ok(self.run.clone())
    }
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.finalize(RunStatus::Failed) {
                tracing::warn!(run_id = %self.run.run_id, error = %e, "failed to finalize run");
            }
        }
    }
}
