//! Ingestion options.

use std::time::Duration;

/// Options for reading a document into a [`DocumentLayout`](crate::model::DocumentLayout).
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Error handling mode for page-level failures
    pub error_mode: ErrorMode,

    /// Maximum spans kept per page (0 = unlimited)
    pub max_spans_per_page: usize,

    /// Wall-clock budget per document; remaining pages are skipped once spent
    pub time_budget: Option<Duration>,
}

impl IngestOptions {
    /// Create new ingest options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the per-page span cap.
    pub fn with_max_spans_per_page(mut self, max: usize) -> Self {
        self.max_spans_per_page = max;
        self
    }

    /// Set the per-document time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            max_spans_per_page: 5000,
            time_budget: None,
        }
    }
}

/// Error handling mode during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_options_builder() {
        let options = IngestOptions::new()
            .lenient()
            .with_max_spans_per_page(100)
            .with_time_budget(Duration::from_secs(3));

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.max_spans_per_page, 100);
        assert_eq!(options.time_budget, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_default_options() {
        let options = IngestOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.max_spans_per_page, 5000);
        assert!(options.time_budget.is_none());
    }
}
