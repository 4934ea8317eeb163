//! Data loading and splitting
//!
//! Reads the tabular dataset with Polars, converts it to ndarray matrices,
//! and partitions rows into train/holdout subsets with a shuffled split.

use crate::error::{Result, WinepressError};
use ndarray::{Array1, Array2, Axis};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::path::Path;

/// Load a CSV file with a header row into a DataFrame.
///
/// Schema is inferred from the first rows; a missing or malformed file is an
/// error that propagates to the caller.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| {
        WinepressError::DataError(format!("cannot open {}: {}", path.display(), e))
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file)
        .finish()?;

    Ok(df)
}

/// Split a DataFrame into a feature matrix and a target vector.
///
/// Every column except `target` becomes a feature, cast to f64. Returns the
/// feature names alongside the matrices so callers can build a signature.
pub fn split_features_target(
    df: &DataFrame,
    target: &str,
) -> Result<(Array2<f64>, Array1<f64>, Vec<String>)> {
    let feature_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != target)
        .map(|s| s.to_string())
        .collect();

    if feature_names.is_empty() {
        return Err(WinepressError::DataError(
            "dataset has no feature columns".to_string(),
        ));
    }

    let target_series = df
        .column(target)
        .map_err(|_| WinepressError::ColumnNotFound(target.to_string()))?;
    let y: Array1<f64> = target_series
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    let x = columns_to_array2(df, &feature_names)?;

    Ok((x, y, feature_names))
}

/// Extract named columns into a row-major Array2<f64>.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|name| {
            let series = df
                .column(name)
                .map_err(|_| WinepressError::ColumnNotFound(name.clone()))?;
            let values: Vec<f64> = series
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        col_data[c][r]
    }))
}

/// The two row-disjoint subsets produced by [`train_test_split`].
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Randomly partition rows into train and holdout subsets.
///
/// Indices are shuffled with a ChaCha8 generator, seeded when `seed` is given
/// and drawn from entropy otherwise. The holdout gets
/// `ceil(n * test_fraction)` rows; no minimum row count is enforced, so tiny
/// inputs yield degenerate (possibly empty) subsets.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<TrainTestSplit> {
    let n = x.nrows();
    if n != y.len() {
        return Err(WinepressError::ShapeError {
            expected: format!("{} target rows", n),
            actual: format!("{} target rows", y.len()),
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    let (test_idx, train_idx) = indices.split_at(n_test.min(n));

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn wine_fixture() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "acidity,sugar,TARGET").unwrap();
        for i in 0..20 {
            let a = i as f64 * 0.1;
            writeln!(file, "{},{},{}", a, a * 2.0, a * 3.0 + 1.0).unwrap();
        }
        file
    }

    #[test]
    fn test_load_csv() {
        let file = wine_fixture();
        let df = load_csv(file.path()).unwrap();
        assert_eq!(df.height(), 20);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("no_such_file.csv")).unwrap_err();
        assert!(matches!(err, WinepressError::DataError(_)));
    }

    #[test]
    fn test_split_features_target() {
        let file = wine_fixture();
        let df = load_csv(file.path()).unwrap();
        let (x, y, names) = split_features_target(&df, "TARGET").unwrap();
        assert_eq!(x.dim(), (20, 2));
        assert_eq!(y.len(), 20);
        assert_eq!(names, vec!["acidity".to_string(), "sugar".to_string()]);
    }

    #[test]
    fn test_split_features_target_missing_column() {
        let file = wine_fixture();
        let df = load_csv(file.path()).unwrap();
        let err = split_features_target(&df, "quality").unwrap_err();
        assert!(matches!(err, WinepressError::ColumnNotFound(_)));
    }

    #[test]
    fn test_train_test_split_sizes() {
        let x = Array2::from_shape_fn((100, 3), |(r, c)| (r * 3 + c) as f64);
        let y = Array1::from_shape_fn(100, |i| i as f64);
        let split = train_test_split(&x, &y, 0.25, Some(7)).unwrap();
        assert_eq!(split.x_test.nrows(), 25);
        assert_eq!(split.x_train.nrows(), 75);
        assert_eq!(split.y_test.len(), 25);
        assert_eq!(split.y_train.len(), 75);
    }

    #[test]
    fn test_train_test_split_rows_stay_paired() {
        // y was built as 10 * first feature, so pairing survives the shuffle
        let x = Array2::from_shape_fn((40, 2), |(r, _)| r as f64);
        let y = Array1::from_shape_fn(40, |i| i as f64 * 10.0);
        let split = train_test_split(&x, &y, 0.25, Some(3)).unwrap();
        for (row, target) in split.x_train.axis_iter(Axis(0)).zip(split.y_train.iter()) {
            assert_eq!(row[0] * 10.0, *target);
        }
        for (row, target) in split.x_test.axis_iter(Axis(0)).zip(split.y_test.iter()) {
            assert_eq!(row[0] * 10.0, *target);
        }
    }

    #[test]
    fn test_train_test_split_seed_is_reproducible() {
        let x = Array2::from_shape_fn((50, 2), |(r, c)| (r + c) as f64);
        let y = Array1::from_shape_fn(50, |i| i as f64);
        let a = train_test_split(&x, &y, 0.25, Some(33)).unwrap();
        let b = train_test_split(&x, &y, 0.25, Some(33)).unwrap();
        assert_eq!(a.y_test, b.y_test);
        assert_eq!(a.x_train, b.x_train);
    }

    #[test]
    fn test_train_test_split_tiny_dataset_degenerates() {
        // One row: everything lands in the holdout, train is empty
        let x = Array2::from_shape_fn((1, 2), |_| 1.0);
        let y = Array1::from_vec(vec![1.0]);
        let split = train_test_split(&x, &y, 0.25, Some(1)).unwrap();
        assert_eq!(split.x_test.nrows(), 1);
        assert_eq!(split.x_train.nrows(), 0);
    }
}
