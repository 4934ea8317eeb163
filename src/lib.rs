//! winepress - ElasticNet wine-quality trainer with experiment tracking
//!
//! One invocation trains an elastic-net-regularized linear regression on a
//! tabular dataset, scores it on a random holdout split, and records the run
//! (parameters, metrics, model artifact with inferred signature) to a
//! tracking store.
//!
//! # Modules
//!
//! - [`config`] - Validated run configuration
//! - [`data`] - CSV loading, feature/target extraction, train/test split
//! - [`model`] - Elastic net via coordinate descent
//! - [`metrics`] - RMSE / MAE / R²
//! - [`tracking`] - Experiment tracking client and store
//! - [`run`] - The end-to-end pipeline
//! - [`cli`] - Command-line interface

pub mod error;

pub mod cli;
pub mod config;
pub mod data;
pub mod metrics;
pub mod model;
pub mod run;
pub mod tracking;

pub use error::{Result, WinepressError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::error::{Result, WinepressError};
    pub use crate::metrics::RegressionReport;
    pub use crate::model::ElasticNet;
    pub use crate::run::{execute, RunSummary, REGISTERED_MODEL_NAME};
    pub use crate::tracking::{ActiveRun, ExperimentTracker, ModelSignature, Run, RunStatus};
}
