use crate::error::{Result, TrendError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inclusive zero-based row range selecting the canonical baseline window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Engine configuration. Defaults carry the canonical values for the
/// turbine start-up dataset; a JSON file can override any field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV file holding the successful start-up reference data.
    pub baseline_path: PathBuf,

    /// Row range of the baseline file used as the comparison window.
    pub baseline_window: RowWindow,

    /// Binary indicator column marking start-of-sequence in candidate data.
    pub trigger_column: String,

    /// Columns whose names contain this marker are never selectable.
    pub timestamp_marker: String,

    /// Upper bound on the number of columns an operator may select.
    pub max_selected_columns: usize,

    /// Tolerance applied when none is supplied, in percent.
    pub default_tolerance: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            baseline_path: PathBuf::from("data/successful_startup.csv"),
            baseline_window: RowWindow { start: 1164, end: 2463 },
            trigger_column: "G1.L4".to_string(),
            timestamp_marker: "Time".to_string(),
            max_selected_columns: 15,
            default_tolerance: 5.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, falling back to defaults for
    /// any field the file omits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.baseline_window.is_empty() {
            return Err(TrendError::Config(format!(
                "baseline window end ({}) precedes start ({})",
                self.baseline_window.end, self.baseline_window.start
            )));
        }
        if !(0.0..=100.0).contains(&self.default_tolerance) {
            return Err(TrendError::Config(format!(
                "default tolerance {} outside 0-100",
                self.default_tolerance
            )));
        }
        if self.max_selected_columns == 0 {
            return Err(TrendError::Config(
                "max_selected_columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.baseline_window.len(), 1300);
        assert_eq!(config.trigger_column, "G1.L4");
    }

    #[test]
    fn inverted_window_rejected() {
        let config = AppConfig {
            baseline_window: RowWindow { start: 10, end: 5 },
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(TrendError::Config(_))));
    }
}
