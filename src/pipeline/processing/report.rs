use std::fmt;
use std::sync::Mutex;

use serde::Serialize;
use tracing::warn;

/// Numeric columns of the raw sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Price,
    QuantitySold,
    TotalSale,
}

impl NumericColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericColumn::Price => crate::constants::PRICE,
            NumericColumn::QuantitySold => crate::constants::QUANTITY_SOLD,
            NumericColumn::TotalSale => crate::constants::TOTAL_SALE,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data-quality anomaly found while cleaning. Issues carry row counts only,
/// never row contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleaningIssue {
    /// `day_of_week` exists but holds no value at all, so every row was dropped.
    DayOfWeekWithoutMode { rows: usize },
    /// Rows sharing a `transaction_id` after text normalization (all copies counted).
    DuplicateTransactionIds { rows: usize },
    /// Cells that could not be read as numbers and were treated as missing.
    NonNumericValues { column: NumericColumn, rows: usize },
    /// Values too large to represent in the output, treated as missing.
    OutOfRangeValues { column: NumericColumn, rows: usize },
    /// Missing prices whose product has no known price to average.
    PriceUnresolved { rows: usize },
    /// Missing quantities left unfilled because no quantity is known at all.
    QuantityUnresolved { rows: usize },
    /// Negative values replaced with a missing marker.
    NegativeValues { column: NumericColumn, rows: usize },
    /// Rows where total_sale disagrees with price * quantity_sold.
    InconsistentTotals { rows: usize },
}

impl CleaningIssue {
    pub fn rows(&self) -> usize {
        match self {
            CleaningIssue::DayOfWeekWithoutMode { rows }
            | CleaningIssue::DuplicateTransactionIds { rows }
            | CleaningIssue::NonNumericValues { rows, .. }
            | CleaningIssue::OutOfRangeValues { rows, .. }
            | CleaningIssue::PriceUnresolved { rows }
            | CleaningIssue::QuantityUnresolved { rows }
            | CleaningIssue::NegativeValues { rows, .. }
            | CleaningIssue::InconsistentTotals { rows } => *rows,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CleaningIssue::DayOfWeekWithoutMode { .. } => "day_of_week_without_mode",
            CleaningIssue::DuplicateTransactionIds { .. } => "duplicate_transaction_ids",
            CleaningIssue::NonNumericValues { .. } => "non_numeric_values",
            CleaningIssue::OutOfRangeValues { .. } => "out_of_range_values",
            CleaningIssue::PriceUnresolved { .. } => "price_unresolved",
            CleaningIssue::QuantityUnresolved { .. } => "quantity_unresolved",
            CleaningIssue::NegativeValues { .. } => "negative_values",
            CleaningIssue::InconsistentTotals { .. } => "inconsistent_totals",
        }
    }
}

impl fmt::Display for CleaningIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleaningIssue::DayOfWeekWithoutMode { rows } => write!(
                f,
                "day_of_week has no values to impute from; dropped {} rows",
                rows
            ),
            CleaningIssue::DuplicateTransactionIds { rows } => write!(
                f,
                "Found {} duplicate transaction_id rows. Dropping duplicates.",
                rows
            ),
            CleaningIssue::NonNumericValues { column, rows } => write!(
                f,
                "Found {} rows with non-numeric {}. Treating them as missing.",
                rows, column
            ),
            CleaningIssue::OutOfRangeValues { column, rows } => write!(
                f,
                "Found {} rows with out-of-range {}. Treating them as missing.",
                rows, column
            ),
            CleaningIssue::PriceUnresolved { rows } => write!(
                f,
                "{} rows have no price and no priced row for the same product",
                rows
            ),
            CleaningIssue::QuantityUnresolved { rows } => write!(
                f,
                "{} rows have no quantity_sold and no quantity is known to average",
                rows
            ),
            CleaningIssue::NegativeValues { column, rows } => write!(
                f,
                "Found {} rows with negative {}. Setting those to missing.",
                rows, column
            ),
            CleaningIssue::InconsistentTotals { rows } => write!(
                f,
                "{} rows with inconsistent total_sale values detected.",
                rows
            ),
        }
    }
}

/// Receives the anomalies the cleaner detects.
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, issue: &CleaningIssue);
}

/// Forwards every issue to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, issue: &CleaningIssue) {
        warn!(kind = issue.kind(), rows = issue.rows(), "{}", issue);
    }
}

/// Keeps issues in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    issues: Mutex<Vec<CleaningIssue>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issues(&self) -> Vec<CleaningIssue> {
        self.issues
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn report(&self, issue: &CleaningIssue) {
        self.issues
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(issue.clone());
    }
}

/// Row accounting for one cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub exact_duplicates_dropped: usize,
    pub missing_transaction_id_dropped: usize,
    pub missing_day_of_week_dropped: usize,
    pub missing_categorical_dropped: usize,
    pub duplicate_transaction_id_dropped: usize,
    pub output_rows: usize,
    pub issues: Vec<CleaningIssue>,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.exact_duplicates_dropped
            + self.missing_transaction_id_dropped
            + self.missing_day_of_week_dropped
            + self.missing_categorical_dropped
            + self.duplicate_transaction_id_dropped
    }

    /// Count reported for an issue kind, if that issue was raised.
    pub fn issue_rows(&self, kind: &str) -> Option<usize> {
        self.issues
            .iter()
            .filter(|i| i.kind() == kind)
            .map(CleaningIssue::rows)
            .reduce(|a, b| a + b)
    }
}
