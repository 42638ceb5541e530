//! Synchronization run results

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::SyncError;

/// One item that could not be synchronized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Identifier that failed
    pub id: u64,
    /// Rendered error chain
    pub error: String,
    /// Error category (`fetch`, `malformed`, `io`)
    pub category: String,
}

impl ItemFailure {
    pub fn new(id: u64, error: &SyncError) -> Self {
        Self {
            id,
            error: render_chain(error),
            category: error.category().to_string(),
        }
    }
}

/// Render an error with its sources, `outer: inner: root`
fn render_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// Final result of a synchronization run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Identifiers submitted
    pub total: usize,
    /// Items whose manifest was written
    pub succeeded: usize,
    /// Items that failed
    pub failed: usize,
    /// Batches executed
    pub batches: usize,
    /// Per-item failures in input order
    pub failures: Vec<ItemFailure>,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl SyncReport {
    /// Whether every item was synchronized
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Percentage of items synchronized
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.total as f64) * 100.0
    }

    pub(crate) fn record_failure(&mut self, failure: ItemFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FetchError, MalformedResponseError};

    #[test]
    fn test_failure_renders_category() {
        let error = SyncError::from(FetchError::ServerError { id: 7, status: 503 });
        let failure = ItemFailure::new(7, &error);
        assert_eq!(failure.id, 7);
        assert_eq!(failure.category, "fetch");
        assert!(failure.error.contains("503"));

        let error = SyncError::from(MalformedResponseError::MissingField {
            id: 8,
            field: "Name",
        });
        let failure = ItemFailure::new(8, &error);
        assert_eq!(failure.category, "malformed");
        assert!(failure.error.contains("Name"));
    }

    #[test]
    fn test_report_success() {
        let mut report = SyncReport {
            total: 4,
            succeeded: 4,
            ..Default::default()
        };
        assert!(report.is_success());
        assert_eq!(report.success_rate(), 100.0);

        report.succeeded = 3;
        report.record_failure(ItemFailure {
            id: 1,
            error: "boom".to_string(),
            category: "io".to_string(),
        });
        assert!(!report.is_success());
        assert_eq!(report.failed, 1);
        assert_eq!(report.success_rate(), 75.0);
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = SyncReport::default();
        assert!(report.is_success());
        assert_eq!(report.success_rate(), 100.0);
    }
}
