//! CSV loading and schema helpers for baseline and candidate tables.

use crate::config::RowWindow;
use crate::error::{Result, TrendError};
use polars::prelude::*;
use regex::Regex;
use std::path::Path;
use tracing::info;

/// Read a CSV file into a DataFrame.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .map_err(|e| TrendError::Polars(format!("Failed to load CSV {}: {}", path.display(), e)))?
        .collect()?;

    info!("Loaded {}: {} rows, {} columns", path.display(), df.height(), df.width());
    Ok(df)
}

/// Load the baseline file and cut it down to the canonical comparison
/// window, re-indexed from 0.
pub fn load_baseline(path: impl AsRef<Path>, window: RowWindow) -> Result<DataFrame> {
    let df = load_csv(path)?;
    let windowed = df.slice(window.start as i64, window.len());
    if windowed.height() < window.len() {
        return Err(TrendError::Config(format!(
            "baseline file has {} rows, window {}..={} needs {}",
            df.height(),
            window.start,
            window.end,
            window.len()
        )));
    }
    Ok(windowed)
}

/// Column names an operator may select: everything in the schema except
/// timestamp-like columns, sorted ascending.
pub fn selectable_columns(df: &DataFrame, timestamp_marker: &str) -> Vec<String> {
    let mut names: Vec<String> = df
        .get_column_names()
        .iter()
        .filter(|name| !name.contains(timestamp_marker))
        .map(|name| name.to_string())
        .collect();
    names.sort();
    names
}

/// Convert string columns containing scientific notation to Float64.
///
/// Sensor exports occasionally serialize large readings as e.g. `-3.97E+07`,
/// which the CSV reader leaves as strings; those columns would otherwise be
/// unusable for deviation arithmetic.
pub fn coerce_numeric_columns(df: DataFrame) -> Result<DataFrame> {
    let scientific_regex = Regex::new(r"^-?\d+\.?\d*[Ee][+-]?\d+$")
        .map_err(|e| TrendError::Config(format!("Failed to create regex: {}", e)))?;
    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    let mut result = df;

    for col_name in &column_names {
        let Ok(col_data) = result.column(col_name) else {
            continue;
        };
        if !matches!(col_data.dtype(), DataType::String) {
            continue;
        }

        let has_scientific = match col_data.str() {
            Ok(str_col) => str_col
                .into_iter()
                .any(|val| val.is_some_and(|v| scientific_regex.is_match(v))),
            Err(_) => false,
        };

        if has_scientific {
            result = result
                .lazy()
                .with_columns([col(col_name).cast(DataType::Float64).alias(col_name)])
                .collect()
                .map_err(|e| {
                    TrendError::Polars(format!(
                        "Failed to convert scientific notation in column {}: {}",
                        col_name, e
                    ))
                })?;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectable_excludes_timestamp_columns() {
        let df = df![
            "Time Stamp" => ["a", "b"],
            "G1.SPEED" => [1.0, 2.0],
            "G1.EGT" => [3.0, 4.0]
        ]
        .unwrap();

        let cols = selectable_columns(&df, "Time");
        assert_eq!(cols, vec!["G1.EGT".to_string(), "G1.SPEED".to_string()]);
    }

    #[test]
    fn scientific_notation_column_coerced() {
        let df = df![
            "raw" => ["-3.97E+07", "1.5E+03"],
            "plain" => ["abc", "def"]
        ]
        .unwrap();

        let coerced = coerce_numeric_columns(df).unwrap();
        assert_eq!(coerced.column("raw").unwrap().dtype(), &DataType::Float64);
        assert_eq!(coerced.column("plain").unwrap().dtype(), &DataType::String);
    }
}
