//! Experiment tracking
//!
//! A small client for recording training runs: parameters, metrics, and the
//! serialized model artifact with its inferred signature. Runs live in a
//! local store derived from the tracking URI; model registration is only
//! performed for non-`file` URI schemes.

mod signature;
mod storage;
mod tracker;

pub use signature::{ColumnSpec, ModelSignature};
pub use storage::{LocalFileStore, RegisteredVersion, StorageBackend};
pub use tracker::{ActiveRun, ExperimentTracker, Run, RunStatus, TrackingUri};
