//! Model signature inference
//!
//! The signature captures the input/output schema attached to a logged model
//! so downstream consumers can validate what they feed it.

use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A single named, typed column in a signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub dtype: String,
}

/// Inferred input/output schema of a fitted model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSignature {
    pub inputs: Vec<ColumnSpec>,
    pub outputs: Vec<ColumnSpec>,
}

fn dtype_name(dtype: &DataType) -> String {
    match dtype {
        DataType::Float32 | DataType::Float64 => "double".to_string(),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "long".to_string(),
        DataType::Boolean => "boolean".to_string(),
        DataType::String => "string".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

impl ModelSignature {
    /// Infer a signature from the training table and training predictions.
    ///
    /// Inputs are every column except `target`, typed from the table schema.
    /// The output is a single prediction column typed from the prediction
    /// vector (always double here).
    pub fn infer(df: &DataFrame, target: &str, _predictions: &Array1<f64>) -> Self {
        let inputs = df
            .get_columns()
            .iter()
            .filter(|col| col.name().as_str() != target)
            .map(|col| ColumnSpec {
                name: col.name().to_string(),
                dtype: dtype_name(col.dtype()),
            })
            .collect();

        let outputs = vec![ColumnSpec {
            name: "prediction".to_string(),
            dtype: "double".to_string(),
        }];

        Self { inputs, outputs }
    }
}
