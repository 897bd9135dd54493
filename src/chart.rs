//! Long-format chart data for the overlay line chart.
//!
//! The presentation layer draws one line per (column, source) pair: color by
//! column, dash pattern by source, baseline fully opaque and candidate at
//! reduced opacity. This module only prepares the points and the y-domain.

use crate::error::{Result, TrendError};
use polars::prelude::*;
use serde::Serialize;

/// Fraction of padding applied to the y-domain on both ends.
const Y_DOMAIN_GAP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesSource {
    Baseline,
    Candidate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub index: usize,
    pub column: String,
    pub source: SeriesSource,
    /// None marks a gap in the series (missing reading).
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    /// `(min * 0.99, max * 1.01)` over every plotted value.
    pub y_domain: (f64, f64),
}

impl ChartData {
    /// Melt the selected columns of both tables into long-format points,
    /// baseline series first.
    pub fn build(
        baseline: &DataFrame,
        candidate: &DataFrame,
        columns: &[String],
    ) -> Result<ChartData> {
        let mut points = Vec::new();
        Self::push_series(&mut points, baseline, columns, SeriesSource::Baseline)?;
        Self::push_series(&mut points, candidate, columns, SeriesSource::Candidate)?;

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for point in &points {
            if let Some(v) = point.value {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }
        let y_domain = if y_min.is_finite() {
            (y_min * (1.0 - Y_DOMAIN_GAP), y_max * (1.0 + Y_DOMAIN_GAP))
        } else {
            (0.0, 0.0)
        };

        Ok(ChartData { points, y_domain })
    }

    fn push_series(
        points: &mut Vec<ChartPoint>,
        df: &DataFrame,
        columns: &[String],
        source: SeriesSource,
    ) -> Result<()> {
        for name in columns {
            let series = df
                .column(name)
                .map_err(|_| TrendError::MissingColumn(name.to_string()))?
                .cast(&DataType::Float64)?;
            for (index, value) in series.f64()?.into_iter().enumerate() {
                points.push(ChartPoint {
                    index,
                    column: name.clone(),
                    source,
                    value,
                });
            }
        }
        Ok(())
    }
}
