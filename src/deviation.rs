//! Per-channel percentage deviation between baseline and candidate tables.

use crate::error::{Result, TrendError};
use polars::prelude::*;
use serde::Serialize;

/// Aggregated absolute percentage deviation for one channel.
#[derive(Debug, Clone, Serialize)]
pub struct DeviationRecord {
    pub column: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// One row of the drill-down table for a single channel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DetailRow {
    pub row: usize,
    pub baseline: f64,
    pub candidate: f64,
    /// Absolute relative difference as a fraction; NaN where the baseline
    /// value is zero.
    pub difference: f64,
}

pub struct DeviationEngine;

impl DeviationEngine {
    /// Compute min/max/mean of `abs((candidate - baseline) / baseline) * 100`
    /// for each requested column, in request order.
    ///
    /// Rows with a zero baseline value are masked to null and skipped by all
    /// three aggregates. The division always uses the baseline as the
    /// denominator; swapping the inputs changes the result.
    pub fn compute(
        baseline: &DataFrame,
        candidate: &DataFrame,
        columns: &[String],
    ) -> Result<Vec<DeviationRecord>> {
        if baseline.height() != candidate.height() {
            return Err(TrendError::AlignmentTooShort {
                expected: baseline.height(),
                actual: candidate.height(),
            });
        }

        let mut records = Vec::with_capacity(columns.len());
        for name in columns {
            let deviation = Self::deviation_series(baseline, candidate, name)?;
            let ca = deviation.f64()?;
            records.push(DeviationRecord {
                column: name.clone(),
                min: ca.min().unwrap_or(f64::NAN),
                max: ca.max().unwrap_or(f64::NAN),
                mean: ca.mean().unwrap_or(f64::NAN),
            });
        }
        Ok(records)
    }

    /// Per-row deviation sequence for one column, nulls where the baseline
    /// is zero.
    fn deviation_series(
        baseline: &DataFrame,
        candidate: &DataFrame,
        name: &str,
    ) -> Result<Series> {
        let base = numeric_column(baseline, name)?.with_name("baseline");
        let cand = numeric_column(candidate, name)?.with_name("candidate");

        let pair = DataFrame::new(vec![base, cand])?;
        let out = pair
            .lazy()
            .select([when(col("baseline").neq(lit(0.0)))
                .then(
                    ((col("candidate") - col("baseline")) / col("baseline") * lit(100.0)).abs(),
                )
                .otherwise(lit(NULL))
                .alias("deviation")])
            .collect()?;

        Ok(out.column("deviation")?.clone())
    }

    /// Row-level comparison for one column, sorted by absolute relative
    /// difference descending (undefined rows last). The difference is kept
    /// as a fraction so a progress indicator can scale it against
    /// `tolerance / 100`.
    pub fn detail(
        baseline: &DataFrame,
        candidate: &DataFrame,
        name: &str,
    ) -> Result<Vec<DetailRow>> {
        let base = numeric_column(baseline, name)?;
        let cand = numeric_column(candidate, name)?;
        let base_ca = base.f64()?;
        let cand_ca = cand.f64()?;

        let mut rows = Vec::with_capacity(base_ca.len());
        for (row, (b, c)) in base_ca.into_iter().zip(cand_ca.into_iter()).enumerate() {
            let (Some(b), Some(c)) = (b, c) else { continue };
            let difference = if b == 0.0 { f64::NAN } else { ((c - b) / b).abs() };
            rows.push(DetailRow {
                row,
                baseline: b,
                candidate: c,
                difference,
            });
        }

        rows.sort_by(|a, b| {
            b.difference
                .partial_cmp(&a.difference)
                .unwrap_or_else(|| a.difference.is_nan().cmp(&b.difference.is_nan()))
        });
        Ok(rows)
    }
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Series> {
    let series = df
        .column(name)
        .map_err(|_| TrendError::MissingColumn(name.to_string()))?;
    Ok(series.cast(&DataType::Float64)?)
}
