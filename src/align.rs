//! Alignment of a candidate start-up recording to the baseline window.

use crate::error::{Result, TrendError};
use polars::prelude::*;
use tracing::info;

pub struct DataAligner;

impl DataAligner {
    /// Align a candidate table to the baseline.
    ///
    /// Locates the first candidate row where `trigger_column == 1`, drops
    /// everything before it and truncates to the baseline's row count. When
    /// the trigger sits near the end of the recording the result is shorter
    /// than the baseline; no padding is applied and downstream computation
    /// rejects the mismatch explicitly.
    pub fn align(
        baseline: &DataFrame,
        candidate: &DataFrame,
        trigger_column: &str,
    ) -> Result<DataFrame> {
        let trigger = candidate
            .column(trigger_column)
            .map_err(|_| TrendError::MissingColumn(trigger_column.to_string()))?
            .cast(&DataType::Float64)?;
        let trigger = trigger.f64()?;

        let start = trigger
            .into_iter()
            .position(|v| v == Some(1.0))
            .ok_or_else(|| TrendError::NoTriggerFound {
                column: trigger_column.to_string(),
            })?;

        let aligned = candidate.slice(start as i64, baseline.height());
        info!(
            "Aligned candidate at trigger row {}: {} of {} baseline rows",
            start,
            aligned.height(),
            baseline.height()
        );
        Ok(aligned)
    }
}
