//! Cursor over the selected channels' deviation records.

use crate::deviation::DeviationRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
}

/// Pure cursor transition over `k` entries. A no-op when `k == 0`.
pub fn advance(cursor: usize, k: usize, action: NavAction) -> usize {
    if k == 0 {
        return 0;
    }
    match action {
        NavAction::Next => (cursor + 1) % k,
        NavAction::Previous => (cursor + k - 1) % k,
    }
}

/// Holds the deviation records for the current selection and a cursor into
/// them. The cursor survives re-selection; when the new selection is too
/// small to contain it, it clamps to the last entry.
#[derive(Debug, Clone, Default)]
pub struct MetricBrowser {
    records: Vec<DeviationRecord>,
    cursor: usize,
}

impl MetricBrowser {
    pub fn new(records: Vec<DeviationRecord>) -> Self {
        Self { records, cursor: 0 }
    }

    /// Replace the record set after a re-selection, keeping the cursor where
    /// possible and clamping to the last entry otherwise.
    pub fn set_records(&mut self, records: Vec<DeviationRecord>) {
        self.records = records;
        if self.records.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.records.len() {
            self.cursor = self.records.len() - 1;
        }
    }

    pub fn next(&mut self) {
        self.cursor = advance(self.cursor, self.records.len(), NavAction::Next);
    }

    pub fn previous(&mut self) {
        self.cursor = advance(self.cursor, self.records.len(), NavAction::Previous);
    }

    pub fn current(&self) -> Option<&DeviationRecord> {
        self.records.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn records(&self) -> &[DeviationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(k: usize) -> Vec<DeviationRecord> {
        (0..k)
            .map(|i| DeviationRecord {
                column: format!("C{}", i),
                min: 0.0,
                max: 0.0,
                mean: i as f64,
            })
            .collect()
    }

    #[test]
    fn next_k_times_returns_to_start() {
        for k in 1..=6 {
            let mut browser = MetricBrowser::new(records(k));
            browser.next();
            let start = browser.cursor();
            for _ in 0..k {
                browser.next();
            }
            assert_eq!(browser.cursor(), start, "k = {}", k);
        }
    }

    #[test]
    fn previous_inverts_next() {
        let mut browser = MetricBrowser::new(records(5));
        for start in 0..5 {
            while browser.cursor() != start {
                browser.next();
            }
            browser.next();
            browser.previous();
            assert_eq!(browser.cursor(), start);
        }
    }

    #[test]
    fn previous_wraps_from_zero() {
        let mut browser = MetricBrowser::new(records(4));
        browser.previous();
        assert_eq!(browser.cursor(), 3);
    }

    #[test]
    fn empty_browser_navigation_is_a_noop() {
        let mut browser = MetricBrowser::new(Vec::new());
        browser.next();
        browser.previous();
        assert_eq!(browser.cursor(), 0);
        assert!(browser.current().is_none());
    }

    #[test]
    fn shrinking_selection_clamps_to_last() {
        let mut browser = MetricBrowser::new(records(5));
        for _ in 0..4 {
            browser.next();
        }
        assert_eq!(browser.cursor(), 4);

        browser.set_records(records(2));
        assert_eq!(browser.cursor(), 1);
        assert_eq!(browser.current().unwrap().column, "C1");
    }

    #[test]
    fn cursor_survives_compatible_reselection() {
        let mut browser = MetricBrowser::new(records(3));
        browser.next();
        browser.set_records(records(3));
        assert_eq!(browser.cursor(), 1);
    }

    #[test]
    fn advance_is_pure_and_guarded() {
        assert_eq!(advance(0, 0, NavAction::Next), 0);
        assert_eq!(advance(2, 3, NavAction::Next), 0);
        assert_eq!(advance(0, 3, NavAction::Previous), 2);
    }
}
