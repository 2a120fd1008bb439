//! Metrics for the sales normalizer.
//!
//! Everything is recorded through the `metrics` facade. Nothing is exported
//! unless the embedding process installs a recorder.

use std::fmt;

/// Every metric name used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Extract metrics
    ExtractSuccess,
    ExtractError,
    ExtractRows,
    ExtractDuration,

    // Clean metrics
    CleanRowsDropped,
    CleanIssuesDetected,
    CleanIssueRows,

    // Normalize metrics
    NormalizeCustomers,
    NormalizeStores,
    NormalizeProducts,
    NormalizeSales,

    // Load metrics
    LoadUploadSuccess,
    LoadUploadError,
    LoadBytes,
    LoadDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ExtractSuccess => "sales_extract_success_total",
            MetricName::ExtractError => "sales_extract_error_total",
            MetricName::ExtractRows => "sales_extract_rows",
            MetricName::ExtractDuration => "sales_extract_duration_seconds",

            MetricName::CleanRowsDropped => "sales_clean_rows_dropped_total",
            MetricName::CleanIssuesDetected => "sales_clean_issues_detected_total",
            MetricName::CleanIssueRows => "sales_clean_issue_rows_total",

            MetricName::NormalizeCustomers => "sales_normalize_customers",
            MetricName::NormalizeStores => "sales_normalize_stores",
            MetricName::NormalizeProducts => "sales_normalize_products",
            MetricName::NormalizeSales => "sales_normalize_sales",

            MetricName::LoadUploadSuccess => "sales_load_upload_success_total",
            MetricName::LoadUploadError => "sales_load_upload_error_total",
            MetricName::LoadBytes => "sales_load_bytes",
            MetricName::LoadDuration => "sales_load_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Extract Metrics
// ============================================================================

pub mod extract {
    use super::MetricName;

    pub fn success(rows: usize, secs: f64) {
        ::metrics::counter!(MetricName::ExtractSuccess.as_str()).increment(1);
        ::metrics::histogram!(MetricName::ExtractRows.as_str()).record(rows as f64);
        ::metrics::histogram!(MetricName::ExtractDuration.as_str()).record(secs);
    }

    pub fn error() {
        ::metrics::counter!(MetricName::ExtractError.as_str()).increment(1);
    }
}

// ============================================================================
// Clean Metrics
// ============================================================================

pub mod clean {
    use super::MetricName;

    /// Rows removed by a cleaning step
    pub fn rows_dropped(step: &'static str, rows: usize) {
        ::metrics::counter!(MetricName::CleanRowsDropped.as_str(), "step" => step)
            .increment(rows as u64);
    }

    /// A data-quality issue and the number of rows it touched
    pub fn issue_detected(kind: &'static str, rows: usize) {
        ::metrics::counter!(MetricName::CleanIssuesDetected.as_str(), "kind" => kind).increment(1);
        ::metrics::counter!(MetricName::CleanIssueRows.as_str(), "kind" => kind)
            .increment(rows as u64);
    }
}

// ============================================================================
// Normalize Metrics
// ============================================================================

pub mod normalize {
    use super::MetricName;

    pub fn tables_built(customers: usize, stores: usize, products: usize, sales: usize) {
        ::metrics::gauge!(MetricName::NormalizeCustomers.as_str()).set(customers as f64);
        ::metrics::gauge!(MetricName::NormalizeStores.as_str()).set(stores as f64);
        ::metrics::gauge!(MetricName::NormalizeProducts.as_str()).set(products as f64);
        ::metrics::gauge!(MetricName::NormalizeSales.as_str()).set(sales as f64);
    }
}

// ============================================================================
// Load Metrics
// ============================================================================

pub mod load {
    use super::MetricName;

    pub fn upload_success(table: &'static str, bytes: usize, secs: f64) {
        ::metrics::counter!(MetricName::LoadUploadSuccess.as_str(), "table" => table).increment(1);
        ::metrics::histogram!(MetricName::LoadBytes.as_str(), "table" => table).record(bytes as f64);
        ::metrics::histogram!(MetricName::LoadDuration.as_str(), "table" => table).record(secs);
    }

    pub fn upload_error(table: &'static str) {
        ::metrics::counter!(MetricName::LoadUploadError.as_str(), "table" => table).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_a_recorder_is_a_noop() {
        clean::rows_dropped("exact_duplicate", 3);
        clean::issue_detected("negative_values", 1);
        normalize::tables_built(1, 2, 3, 4);
        load::upload_success("sales", 10, 0.5);
    }

    #[test]
    fn metric_names_are_prefixed() {
        assert_eq!(MetricName::LoadUploadError.to_string(), "sales_load_upload_error_total");
        assert!(MetricName::CleanRowsDropped.as_str().starts_with("sales_clean_"));
    }
}
