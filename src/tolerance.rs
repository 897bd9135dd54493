//! Classification of mean deviations against an operator tolerance.

use crate::deviation::DeviationRecord;
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Mean deviation is above the tolerance.
    Exceeds,
    /// Mean deviation is exactly zero.
    Zero,
    /// Mean deviation is nonzero but inside the tolerance.
    Within,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnVerdict {
    pub column: String,
    pub mean: f64,
    pub verdict: Verdict,
}

/// Result of classifying a set of columns at one tolerance level.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub tolerance: f64,
    pub verdicts: Vec<ColumnVerdict>,
}

impl Classification {
    /// One `- `-prefixed narrative line per column, in classification order.
    pub fn narrative(&self) -> String {
        self.verdicts
            .iter()
            .map(|v| format!("- {}", self.line(v)))
            .join("\n")
    }

    fn line(&self, v: &ColumnVerdict) -> String {
        match v.verdict {
            Verdict::Exceeds => format!(
                "Difference of more than {:.2}% in column {}.",
                self.tolerance, v.column
            ),
            Verdict::Zero => format!("No difference in column {}.", v.column),
            Verdict::Within => format!(
                "Difference of less than {:.2}% in column {}.",
                self.tolerance, v.column
            ),
        }
    }

    pub fn exceeding_columns(&self) -> Vec<&str> {
        self.verdicts
            .iter()
            .filter(|v| v.verdict == Verdict::Exceeds)
            .map(|v| v.column.as_str())
            .collect()
    }
}

pub struct ToleranceClassifier;

impl ToleranceClassifier {
    /// Classify each record's mean deviation against a uniform tolerance.
    ///
    /// A NaN mean (every row had a zero baseline) compares false against
    /// both bounds and lands on `Within`.
    pub fn classify(records: &[DeviationRecord], tolerance: f64) -> Classification {
        let verdicts = records
            .iter()
            .map(|record| ColumnVerdict {
                column: record.column.clone(),
                mean: record.mean,
                verdict: Self::verdict(record.mean, tolerance),
            })
            .collect();

        Classification { tolerance, verdicts }
    }

    fn verdict(mean: f64, tolerance: f64) -> Verdict {
        if mean > tolerance {
            Verdict::Exceeds
        } else if mean == 0.0 {
            Verdict::Zero
        } else {
            Verdict::Within
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(column: &str, mean: f64) -> DeviationRecord {
        DeviationRecord {
            column: column.to_string(),
            min: 0.0,
            max: mean,
            mean,
        }
    }

    #[test]
    fn three_way_verdicts() {
        let records = vec![record("A", 6.7), record("B", 0.0), record("C", 2.0)];
        let classification = ToleranceClassifier::classify(&records, 5.0);

        assert_eq!(classification.verdicts[0].verdict, Verdict::Exceeds);
        assert_eq!(classification.verdicts[1].verdict, Verdict::Zero);
        assert_eq!(classification.verdicts[2].verdict, Verdict::Within);
        assert_eq!(classification.exceeding_columns(), vec!["A"]);
    }

    #[test]
    fn narrative_formats_tolerance_to_two_decimals() {
        let records = vec![record("G1.EGT", 10.0), record("G1.SPEED", 0.0)];
        let classification = ToleranceClassifier::classify(&records, 5.0);

        let narrative = classification.narrative();
        let lines: Vec<&str> = narrative.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "- Difference of more than 5.00% in column G1.EGT.");
        assert_eq!(lines[1], "- No difference in column G1.SPEED.");
    }

    #[test]
    fn verdict_is_monotonic_in_mean() {
        let tolerance = 5.0;
        let rank = |mean: f64| match ToleranceClassifier::verdict(mean, tolerance) {
            Verdict::Zero => 0,
            Verdict::Within => 1,
            Verdict::Exceeds => 2,
        };

        let means = [0.0, 0.1, 1.0, 4.99, 5.0, 5.01, 50.0, 100.0];
        for pair in means.windows(2) {
            assert!(rank(pair[0]) <= rank(pair[1]));
        }
    }

    #[test]
    fn boundary_mean_equal_to_tolerance_is_within() {
        let records = vec![record("A", 5.0)];
        let classification = ToleranceClassifier::classify(&records, 5.0);
        assert_eq!(classification.verdicts[0].verdict, Verdict::Within);
    }

    #[test]
    fn nan_mean_is_within() {
        let records = vec![record("A", f64::NAN)];
        let classification = ToleranceClassifier::classify(&records, 5.0);
        assert_eq!(classification.verdicts[0].verdict, Verdict::Within);
    }
}
