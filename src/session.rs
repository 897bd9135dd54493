//! Single-session orchestration: upload, selection, tolerance, navigation.
//!
//! One operator interaction maps to one method call; every call fully
//! resolves before the next is accepted, so there is no locking anywhere.

use crate::align::DataAligner;
use crate::browser::MetricBrowser;
use crate::chart::ChartData;
use crate::config::AppConfig;
use crate::dataset;
use crate::deviation::{DetailRow, DeviationEngine, DeviationRecord};
use crate::error::{Result, TrendError};
use crate::tolerance::{Classification, ToleranceClassifier};
use polars::prelude::*;
use std::path::Path;
use tracing::{info, warn};

pub const UPLOAD_PROMPT: &str = "Please upload a candidate data file first.";
pub const SELECTION_PROMPT: &str =
    "Please select one or more columns to display the comparison.";

/// What the presentation layer should show after the latest interaction.
#[derive(Debug)]
pub enum SessionView {
    AwaitingUpload { prompt: &'static str },
    AwaitingSelection { prompt: &'static str },
    Report(Box<Report>),
}

/// Everything needed to render one screen: the active metric card, the
/// drill-down rows for it, the overlay chart and the narrative block.
#[derive(Debug)]
pub struct Report {
    pub cursor: usize,
    pub current: DeviationRecord,
    pub detail: Vec<DetailRow>,
    pub records: Vec<DeviationRecord>,
    pub classification: Classification,
    pub chart: ChartData,
}

pub struct Session {
    config: AppConfig,
    baseline: DataFrame,
    candidate: Option<DataFrame>,
    selection: Vec<String>,
    tolerance: f64,
    browser: MetricBrowser,
}

impl Session {
    /// Load the baseline window from the configured path and start an empty
    /// session. The baseline is read once and cached for the process
    /// lifetime.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let baseline = dataset::load_baseline(&config.baseline_path, config.baseline_window)?;
        Ok(Self::with_baseline(config, baseline))
    }

    /// Start a session around an already-loaded baseline table. The caller
    /// is responsible for any row windowing.
    pub fn with_baseline(config: AppConfig, baseline: DataFrame) -> Self {
        let tolerance = config.default_tolerance;
        Self {
            config,
            baseline,
            candidate: None,
            selection: Vec::new(),
            tolerance,
            browser: MetricBrowser::default(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn baseline(&self) -> &DataFrame {
        &self.baseline
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn browser(&self) -> &MetricBrowser {
        &self.browser
    }

    /// Columns the operator may pick from, sorted, timestamps excluded.
    pub fn selectable_columns(&self) -> Vec<String> {
        dataset::selectable_columns(&self.baseline, &self.config.timestamp_marker)
    }

    /// Read a candidate CSV from disk and take it into the session.
    pub fn upload_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let df = dataset::load_csv(path)?;
        self.upload_frame(df)
    }

    /// Replace the session's candidate with a freshly uploaded table.
    ///
    /// The table is numerically coerced and trigger-aligned before it is
    /// stored; on any failure the previous candidate is left untouched.
    pub fn upload_frame(&mut self, candidate: DataFrame) -> Result<()> {
        let candidate = dataset::coerce_numeric_columns(candidate)?;
        let aligned = DataAligner::align(&self.baseline, &candidate, &self.config.trigger_column)?;
        let records = if self.selection.is_empty() {
            Vec::new()
        } else {
            DeviationEngine::compute(&self.baseline, &aligned, &self.selection)?
        };
        self.candidate = Some(aligned);
        self.browser.set_records(records);
        Ok(())
    }

    /// Establish a new selected column set and recompute derived state.
    pub fn select_columns(&mut self, names: &[String]) -> Result<()> {
        if names.len() > self.config.max_selected_columns {
            return Err(TrendError::InvalidSelection(format!(
                "{} columns selected, at most {} allowed",
                names.len(),
                self.config.max_selected_columns
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(TrendError::InvalidSelection(format!(
                    "column {} selected twice",
                    name
                )));
            }
            if name.contains(&self.config.timestamp_marker) {
                return Err(TrendError::InvalidSelection(format!(
                    "column {} is a timestamp column",
                    name
                )));
            }
            if self.baseline.column(name).is_err() {
                return Err(TrendError::MissingColumn(name.clone()));
            }
        }

        let records = match &self.candidate {
            Some(candidate) if !names.is_empty() => {
                DeviationEngine::compute(&self.baseline, candidate, names)?
            }
            _ => Vec::new(),
        };

        info!("Selection changed: {} columns", names.len());
        self.selection = names.to_vec();
        self.browser.set_records(records);
        Ok(())
    }

    /// Set the tolerance, clamped into 0-100 percent.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        let clamped = tolerance.clamp(0.0, 100.0);
        if clamped != tolerance {
            warn!("Tolerance {} clamped to {}", tolerance, clamped);
        }
        self.tolerance = clamped;
    }

    pub fn next_metric(&mut self) {
        self.browser.next();
    }

    pub fn previous_metric(&mut self) {
        self.browser.previous();
    }

    /// Assemble what the presentation layer should render right now.
    pub fn view(&self) -> Result<SessionView> {
        let Some(candidate) = &self.candidate else {
            return Ok(SessionView::AwaitingUpload { prompt: UPLOAD_PROMPT });
        };
        let Some(current) = self.browser.current() else {
            return Ok(SessionView::AwaitingSelection { prompt: SELECTION_PROMPT });
        };

        let detail = DeviationEngine::detail(&self.baseline, candidate, &current.column)?;
        let classification = ToleranceClassifier::classify(self.browser.records(), self.tolerance);
        let chart = ChartData::build(&self.baseline, candidate, &self.selection)?;

        Ok(SessionView::Report(Box::new(Report {
            cursor: self.browser.cursor(),
            current: current.clone(),
            detail,
            records: self.browser.records().to_vec(),
            classification,
            chart,
        })))
    }
}

/// Two-decimal percentage formatting for metric cards; undefined
/// aggregates render as "n/a".
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(6.666666), "6.67%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(f64::NAN), "n/a");
    }

    #[test]
    fn tolerance_is_clamped() {
        let config = AppConfig::default();
        let baseline = df!["X" => [1.0]].unwrap();
        let mut session = Session::with_baseline(config, baseline);

        session.set_tolerance(250.0);
        assert_eq!(session.tolerance(), 100.0);
        session.set_tolerance(-3.0);
        assert_eq!(session.tolerance(), 0.0);
    }
}
