//! Row-level cleaning of the raw sales table.
//!
//! The steps run in a fixed order because later steps depend on earlier
//! cleanup: duplicates are removed before keys are checked, text is
//! normalized before transaction ids are compared, and numbers are coerced
//! before any statistic is computed. Cell-level problems never fail a run;
//! they are repaired or set to missing and surfaced as [`CleaningIssue`]s.

pub mod impute;
pub mod text;

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::constants::TOTAL_SALE_TOLERANCE;
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::report::{
    CleaningIssue, CleaningReport, DiagnosticsSink, NumericColumn,
};
use crate::pipeline::processing::schema::{RawRecord, RawSchema};
use crate::table::RawTable;

use impute::{coerce_numeric, fits_i64, mean, mode, round_to};
use text::{title_case_field, trim_field};

/// A transaction whose dimension keys are all present. Numeric fields are still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRecord {
    pub transaction_id: String,
    pub day_of_week: Option<String>,
    pub product_name: String,
    pub product_category: String,
    pub store_location: String,
    pub customer_name: String,
    pub price: Option<String>,
    pub quantity_sold: Option<String>,
    pub total_sale: Option<String>,
}

/// A fully cleaned transaction, ready to be keyed into the dimension tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub transaction_id: String,
    pub day_of_week: Option<String>,
    pub product_name: String,
    pub product_category: String,
    pub store_location: String,
    pub customer_name: String,
    pub price: Option<f64>,
    /// Integral once quantities have been imputed.
    pub quantity_sold: Option<f64>,
    pub total_sale: Option<f64>,
}

/// Output of the cleaning stage. Row order is the contiguous order the
/// dimension ids are assigned in.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub records: Vec<CleanRecord>,
    pub report: CleaningReport,
}

pub struct Cleaner<'a> {
    sink: &'a dyn DiagnosticsSink,
}

impl<'a> Cleaner<'a> {
    pub fn new(sink: &'a dyn DiagnosticsSink) -> Self {
        Self { sink }
    }

    /// Run every cleaning step over an owned raw table.
    pub fn clean(&self, table: RawTable) -> Result<CleanedTable> {
        let schema = RawSchema::resolve(&table)?;
        let mut report = CleaningReport {
            input_rows: table.len(),
            ..Default::default()
        };
        info!(rows = table.len(), "Starting data cleaning");

        let RawTable { rows: mut raw_rows, .. } = table;
        report.exact_duplicates_dropped = drop_exact_duplicates(&mut raw_rows);
        self.dropped("exact_duplicate", report.exact_duplicates_dropped);

        let mut records: Vec<RawRecord> = raw_rows.iter().map(|row| schema.record(row)).collect();
        drop(raw_rows);

        report.missing_transaction_id_dropped = drop_missing_transaction_ids(&mut records);
        self.dropped("missing_transaction_id", report.missing_transaction_id_dropped);

        if schema.has_day_of_week() {
            match impute_day_of_week(&mut records) {
                DayOfWeekOutcome::Filled { value, rows } => {
                    debug!(rows, value = %value, "Filled missing day_of_week with mode");
                }
                DayOfWeekOutcome::DroppedAll { rows } => {
                    report.missing_day_of_week_dropped = rows;
                    self.dropped("missing_day_of_week", rows);
                    if rows > 0 {
                        self.raise(&mut report, CleaningIssue::DayOfWeekWithoutMode { rows });
                    }
                }
            }
        }

        let (mut keyed, dropped) = retain_complete_keys(records);
        report.missing_categorical_dropped = dropped;
        self.dropped("missing_categorical", dropped);

        normalize_text(&mut keyed);

        let (duplicated, dropped) = drop_duplicate_transaction_ids(&mut keyed);
        report.duplicate_transaction_id_dropped = dropped;
        if duplicated > 0 {
            self.raise(&mut report, CleaningIssue::DuplicateTransactionIds { rows: duplicated });
        }
        self.dropped("duplicate_transaction_id", dropped);

        let (mut records, non_numeric, oversized) = coerce_numeric_columns(keyed);
        for (column, rows) in non_numeric {
            if rows > 0 {
                self.raise(&mut report, CleaningIssue::NonNumericValues { column, rows });
            }
        }
        if oversized > 0 {
            self.raise(
                &mut report,
                CleaningIssue::OutOfRangeValues {
                    column: NumericColumn::QuantitySold,
                    rows: oversized,
                },
            );
        }

        let unresolved = impute_prices(&mut records);
        if unresolved > 0 {
            self.raise(&mut report, CleaningIssue::PriceUnresolved { rows: unresolved });
        }

        let unresolved = impute_quantities(&mut records);
        if unresolved > 0 {
            self.raise(&mut report, CleaningIssue::QuantityUnresolved { rows: unresolved });
        }

        let (derived, overflowed) = derive_total_sales(&mut records);
        debug!(rows = derived, "Derived missing total_sale values");
        if overflowed > 0 {
            self.raise(
                &mut report,
                CleaningIssue::OutOfRangeValues {
                    column: NumericColumn::TotalSale,
                    rows: overflowed,
                },
            );
        }

        for (column, rows) in nullify_negatives(&mut records) {
            if rows > 0 {
                self.raise(&mut report, CleaningIssue::NegativeValues { column, rows });
            }
        }

        let inconsistent = count_inconsistent_totals(&records);
        if inconsistent > 0 {
            self.raise(&mut report, CleaningIssue::InconsistentTotals { rows: inconsistent });
        }

        report.output_rows = records.len();
        info!(
            input_rows = report.input_rows,
            output_rows = report.output_rows,
            dropped = report.rows_dropped(),
            issues = report.issues.len(),
            "Data cleaning complete"
        );

        Ok(CleanedTable { records, report })
    }

    fn raise(&self, report: &mut CleaningReport, issue: CleaningIssue) {
        metrics::clean::issue_detected(issue.kind(), issue.rows());
        self.sink.report(&issue);
        report.issues.push(issue);
    }

    fn dropped(&self, step: &'static str, rows: usize) {
        if rows > 0 {
            debug!(step, rows, "Dropped rows");
            metrics::clean::rows_dropped(step, rows);
        }
    }
}

/// Remove rows identical across every column, keeping the first copy.
pub fn drop_exact_duplicates(rows: &mut Vec<Vec<Option<String>>>) -> usize {
    let before = rows.len();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(before);
    rows.retain(|row| seen.insert(row.clone()));
    before - rows.len()
}

pub fn drop_missing_transaction_ids(records: &mut Vec<RawRecord>) -> usize {
    let before = records.len();
    records.retain(|r| r.transaction_id.is_some());
    before - records.len()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOfWeekOutcome {
    Filled { value: String, rows: usize },
    DroppedAll { rows: usize },
}

/// Fill missing `day_of_week` with the most frequent value. When no value
/// exists to take a mode from, every row is dropped instead.
pub fn impute_day_of_week(records: &mut Vec<RawRecord>) -> DayOfWeekOutcome {
    let Some(value) = mode(records.iter().filter_map(|r| r.day_of_week.as_deref())) else {
        let rows = records.len();
        records.clear();
        return DayOfWeekOutcome::DroppedAll { rows };
    };

    let mut rows = 0;
    for record in records.iter_mut().filter(|r| r.day_of_week.is_none()) {
        record.day_of_week = Some(value.clone());
        rows += 1;
    }
    DayOfWeekOutcome::Filled { value, rows }
}

/// Keep only rows carrying a transaction id and every dimension key.
pub fn retain_complete_keys(records: Vec<RawRecord>) -> (Vec<KeyedRecord>, usize) {
    let before = records.len();
    let keyed: Vec<KeyedRecord> = records
        .into_iter()
        .filter_map(|r| {
            let RawRecord {
                transaction_id: Some(transaction_id),
                day_of_week,
                product_name: Some(product_name),
                product_category: Some(product_category),
                store_location: Some(store_location),
                customer_name: Some(customer_name),
                price,
                quantity_sold,
                total_sale,
            } = r
            else {
                return None;
            };
            Some(KeyedRecord {
                transaction_id,
                day_of_week,
                product_name,
                product_category,
                store_location,
                customer_name,
                price,
                quantity_sold,
                total_sale,
            })
        })
        .collect();
    let dropped = before - keyed.len();
    (keyed, dropped)
}

/// Trim every text field; title-case customer, store and weekday names.
/// Product names and categories keep their casing.
pub fn normalize_text(records: &mut [KeyedRecord]) {
    for r in records.iter_mut() {
        r.product_name = r.product_name.trim().to_string();
        r.product_category = r.product_category.trim().to_string();
        r.store_location = text::title_case(r.store_location.trim());
        r.customer_name = text::title_case(r.customer_name.trim());
        trim_field(&mut r.day_of_week);
        title_case_field(&mut r.day_of_week);
    }
}

/// Keep the first row for each transaction id. Returns the number of rows
/// involved in any duplication and the number removed.
pub fn drop_duplicate_transaction_ids(records: &mut Vec<KeyedRecord>) -> (usize, usize) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records.iter() {
        *counts.entry(r.transaction_id.as_str()).or_insert(0) += 1;
    }
    let duplicated: usize = counts.values().filter(|&&n| n > 1).sum();
    if duplicated == 0 {
        return (0, 0);
    }

    let before = records.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    records.retain(|r| seen.insert(r.transaction_id.clone()));
    (duplicated, before - records.len())
}

/// Parse the numeric columns, counting cells that were present but unreadable.
/// Quantities that cannot be stored as whole `i64` counts become missing and
/// are counted separately.
pub fn coerce_numeric_columns(
    records: Vec<KeyedRecord>,
) -> (Vec<CleanRecord>, [(NumericColumn, usize); 3], usize) {
    let mut unreadable = [0usize; 3];
    let mut oversized = 0;
    let mut coerce = |cell: Option<String>, slot: usize| {
        let value = coerce_numeric(cell.as_deref());
        if cell.is_some() && value.is_none() {
            unreadable[slot] += 1;
        }
        value
    };

    let clean = records
        .into_iter()
        .map(|r| CleanRecord {
            price: coerce(r.price, 0),
            quantity_sold: coerce(r.quantity_sold, 1).filter(|&q| {
                let fits = fits_i64(q);
                if !fits {
                    oversized += 1;
                }
                fits
            }),
            total_sale: coerce(r.total_sale, 2),
            transaction_id: r.transaction_id,
            day_of_week: r.day_of_week,
            product_name: r.product_name,
            product_category: r.product_category,
            store_location: r.store_location,
            customer_name: r.customer_name,
        })
        .collect();

    let counts = [
        (NumericColumn::Price, unreadable[0]),
        (NumericColumn::QuantitySold, unreadable[1]),
        (NumericColumn::TotalSale, unreadable[2]),
    ];
    (clean, counts, oversized)
}

/// Fill missing prices with the mean known price of the same product name.
/// Returns how many prices stayed missing because their product has no price at all.
pub fn impute_prices(records: &mut [CleanRecord]) -> usize {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for r in records.iter() {
        if let Some(price) = r.price {
            let entry = sums.entry(r.product_name.as_str()).or_insert((0.0, 0));
            entry.0 += price;
            entry.1 += 1;
        }
    }
    let means: HashMap<String, f64> = sums
        .into_iter()
        .map(|(name, (sum, n))| (name.to_string(), sum / n as f64))
        .collect();

    let mut unresolved = 0;
    for r in records.iter_mut().filter(|r| r.price.is_none()) {
        match means.get(&r.product_name) {
            Some(&m) => r.price = Some(m),
            None => unresolved += 1,
        }
    }
    unresolved
}

/// Fill missing quantities with the global mean and round every quantity
/// to a whole number. Returns how many stayed missing because no quantity is known.
pub fn impute_quantities(records: &mut [CleanRecord]) -> usize {
    let fill = mean(records.iter().filter_map(|r| r.quantity_sold));

    let mut unresolved = 0;
    for r in records.iter_mut() {
        match (r.quantity_sold, fill) {
            (Some(q), _) => r.quantity_sold = Some(round_to(q, 0)),
            (None, Some(m)) => r.quantity_sold = Some(round_to(m, 0)),
            (None, None) => unresolved += 1,
        }
    }
    unresolved
}

/// Derive missing totals as price * quantity, rounded to cents. Returns the
/// number derived and the number left missing because the product overflows.
pub fn derive_total_sales(records: &mut [CleanRecord]) -> (usize, usize) {
    let mut derived = 0;
    let mut overflowed = 0;
    for r in records.iter_mut().filter(|r| r.total_sale.is_none()) {
        if let (Some(price), Some(qty)) = (r.price, r.quantity_sold) {
            let total = round_to(price * qty, 2);
            if total.is_finite() {
                r.total_sale = Some(total);
                derived += 1;
            } else {
                overflowed += 1;
            }
        }
    }
    (derived, overflowed)
}

/// Replace negative numbers with missing markers, counting per column.
pub fn nullify_negatives(records: &mut [CleanRecord]) -> [(NumericColumn, usize); 3] {
    let mut counts = [0usize; 3];
    for r in records.iter_mut() {
        for (slot, field) in [&mut r.price, &mut r.quantity_sold, &mut r.total_sale]
            .into_iter()
            .enumerate()
        {
            if field.is_some_and(|v| v < 0.0) {
                *field = None;
                counts[slot] += 1;
            }
        }
    }
    [
        (NumericColumn::Price, counts[0]),
        (NumericColumn::QuantitySold, counts[1]),
        (NumericColumn::TotalSale, counts[2]),
    ]
}

/// Rows whose total differs from price * quantity by more than a cent.
/// Rows missing any of the three values are not counted.
pub fn count_inconsistent_totals(records: &[CleanRecord]) -> usize {
    records
        .iter()
        .filter(|r| match (r.total_sale, r.price, r.quantity_sold) {
            (Some(total), Some(price), Some(qty)) => (total - price * qty).abs() > TOTAL_SALE_TOLERANCE,
            _ => false,
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::report::CollectingSink;

    fn keyed(id: &str) -> KeyedRecord {
        KeyedRecord {
            transaction_id: id.to_string(),
            day_of_week: Some("Monday".into()),
            product_name: "Tea".into(),
            product_category: "Drinks".into(),
            store_location: "Boston".into(),
            customer_name: "Ann".into(),
            price: None,
            quantity_sold: None,
            total_sale: None,
        }
    }

    fn clean(product: &str, price: Option<f64>, qty: Option<f64>, total: Option<f64>) -> CleanRecord {
        CleanRecord {
            transaction_id: "t".into(),
            day_of_week: None,
            product_name: product.into(),
            product_category: "c".into(),
            store_location: "s".into(),
            customer_name: "n".into(),
            price,
            quantity_sold: qty,
            total_sale: total,
        }
    }

    #[test]
    fn exact_duplicates_keep_first_copy() {
        let mut rows = vec![
            vec![Some("1".into()), None],
            vec![Some("2".into()), None],
            vec![Some("1".into()), None],
            vec![Some("1".into()), Some("x".into())],
        ];
        assert_eq!(drop_exact_duplicates(&mut rows), 1);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][1].as_deref(), Some("x"));
    }

    #[test]
    fn day_of_week_filled_with_mode() {
        let mut records = vec![
            RawRecord { day_of_week: Some("Friday".into()), ..Default::default() },
            RawRecord { day_of_week: None, ..Default::default() },
            RawRecord { day_of_week: Some("Friday".into()), ..Default::default() },
            RawRecord { day_of_week: Some("Monday".into()), ..Default::default() },
        ];
        let outcome = impute_day_of_week(&mut records);
        assert_eq!(outcome, DayOfWeekOutcome::Filled { value: "Friday".into(), rows: 1 });
        assert_eq!(records[1].day_of_week.as_deref(), Some("Friday"));
    }

    #[test]
    fn day_of_week_without_values_drops_everything() {
        let mut records = vec![RawRecord::default(), RawRecord::default()];
        assert_eq!(impute_day_of_week(&mut records), DayOfWeekOutcome::DroppedAll { rows: 2 });
        assert!(records.is_empty());
    }

    #[test]
    fn incomplete_keys_are_dropped() {
        let complete = RawRecord {
            transaction_id: Some("t1".into()),
            product_name: Some("Tea".into()),
            product_category: Some("Drinks".into()),
            store_location: Some("Boston".into()),
            customer_name: Some("Ann".into()),
            ..Default::default()
        };
        let mut no_store = complete.clone();
        no_store.store_location = None;

        let (keyed, dropped) = retain_complete_keys(vec![complete, no_store]);
        assert_eq!(dropped, 1);
        assert_eq!(keyed[0].transaction_id, "t1");
    }

    #[test]
    fn text_is_trimmed_and_selectively_title_cased() {
        let mut records = vec![KeyedRecord {
            product_name: " green tea ".into(),
            product_category: " DRINKS".into(),
            store_location: "  new york ".into(),
            customer_name: "ann LEE ".into(),
            day_of_week: Some(" monday".into()),
            ..keyed("t1")
        }];
        normalize_text(&mut records);
        let r = &records[0];
        assert_eq!(r.product_name, "green tea");
        assert_eq!(r.product_category, "DRINKS");
        assert_eq!(r.store_location, "New York");
        assert_eq!(r.customer_name, "Ann Lee");
        assert_eq!(r.day_of_week.as_deref(), Some("Monday"));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut first = keyed("t1");
        first.customer_name = "First".into();
        let mut records = vec![first, keyed("t2"), keyed("t1")];
        let (duplicated, dropped) = drop_duplicate_transaction_ids(&mut records);
        assert_eq!(duplicated, 2);
        assert_eq!(dropped, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].customer_name, "First");
    }

    #[test]
    fn coercion_counts_unreadable_cells() {
        let mut r = keyed("t1");
        r.price = Some("abc".into());
        r.quantity_sold = Some("2".into());
        let (records, counts, oversized) = coerce_numeric_columns(vec![r]);
        assert_eq!(records[0].price, None);
        assert_eq!(records[0].quantity_sold, Some(2.0));
        assert_eq!(counts[0], (NumericColumn::Price, 1));
        assert_eq!(counts[1], (NumericColumn::QuantitySold, 0));
        assert_eq!(oversized, 0);
    }

    #[test]
    fn quantities_beyond_i64_become_missing() {
        let mut huge = keyed("t1");
        huge.quantity_sold = Some("1e30".into());
        let mut small = keyed("t2");
        small.quantity_sold = Some("3".into());

        let (records, counts, oversized) = coerce_numeric_columns(vec![huge, small]);
        assert_eq!(records[0].quantity_sold, None);
        assert_eq!(records[1].quantity_sold, Some(3.0));
        assert_eq!(counts[1], (NumericColumn::QuantitySold, 0));
        assert_eq!(oversized, 1);
    }

    #[test]
    fn price_filled_with_product_mean() {
        let mut records = vec![
            clean("Tea", None, None, None),
            clean("Tea", Some(10.0), None, None),
            clean("Tea", Some(20.0), None, None),
            clean("Coffee", Some(3.0), None, None),
            clean("Cake", None, None, None),
        ];
        let unresolved = impute_prices(&mut records);
        assert_eq!(records[0].price, Some(15.0));
        assert_eq!(records[3].price, Some(3.0));
        assert_eq!(records[4].price, None);
        assert_eq!(unresolved, 1);
    }

    #[test]
    fn quantity_filled_with_rounded_global_mean() {
        let mut records = vec![
            clean("a", None, Some(2.0), None),
            clean("a", None, Some(4.0), None),
            clean("a", None, None, None),
        ];
        assert_eq!(impute_quantities(&mut records), 0);
        assert_eq!(records[2].quantity_sold, Some(3.0));
    }

    #[test]
    fn quantity_without_any_values_stays_missing() {
        let mut records = vec![clean("a", None, None, None)];
        assert_eq!(impute_quantities(&mut records), 1);
        assert_eq!(records[0].quantity_sold, None);
    }

    #[test]
    fn total_derived_from_price_and_quantity() {
        let mut records = vec![
            clean("a", Some(5.0), Some(3.0), None),
            clean("a", Some(5.0), Some(3.0), Some(99.0)),
            clean("a", None, Some(3.0), None),
        ];
        assert_eq!(derive_total_sales(&mut records), (1, 0));
        assert_eq!(records[0].total_sale, Some(15.0));
        assert_eq!(records[1].total_sale, Some(99.0));
        assert_eq!(records[2].total_sale, None);
    }

    #[test]
    fn overflowing_totals_stay_missing() {
        let mut records = vec![
            clean("a", Some(1e307), Some(100.0), None),
            clean("a", Some(1e307), Some(1.0), None),
        ];
        assert_eq!(derive_total_sales(&mut records), (1, 1));
        assert_eq!(records[0].total_sale, None);
        assert_eq!(records[1].total_sale, Some(1e307));
    }

    #[test]
    fn oversized_numbers_are_reported_not_written() {
        let csv = "\
transaction_id,day_of_week,product_name,product_category,store_location,customer_name,price,quantity_sold,total_sale
t1,Monday,Tea,Drinks,Boston,ann,1e307,100,
t2,Monday,Cake,Food,Boston,ann,1,1e30,1
t3,Monday,Cake,Food,Boston,ann,1,3,3
";
        let table = RawTable::from_csv_str(csv).unwrap();
        let sink = CollectingSink::new();
        let cleaned = Cleaner::new(&sink).clean(table).unwrap();

        assert!(cleaned
            .records
            .iter()
            .all(|r| r.total_sale.map_or(true, f64::is_finite)));
        assert_eq!(cleaned.records[0].total_sale, None);
        // mean of the quantities that fit: 100 and 3
        assert_eq!(cleaned.records[1].quantity_sold, Some(52.0));

        let issues = sink.issues();
        assert!(issues.contains(&CleaningIssue::OutOfRangeValues {
            column: NumericColumn::QuantitySold,
            rows: 1
        }));
        assert!(issues.contains(&CleaningIssue::OutOfRangeValues {
            column: NumericColumn::TotalSale,
            rows: 1
        }));
    }

    #[test]
    fn negatives_become_missing_not_dropped() {
        let mut records = vec![
            clean("a", Some(-5.0), Some(1.0), Some(3.0)),
            clean("a", Some(5.0), Some(-1.0), Some(-3.0)),
        ];
        let counts = nullify_negatives(&mut records);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, None);
        assert_eq!(counts, [
            (NumericColumn::Price, 1),
            (NumericColumn::QuantitySold, 1),
            (NumericColumn::TotalSale, 1),
        ]);
    }

    #[test]
    fn audit_ignores_rows_with_missing_values() {
        let records = vec![
            clean("a", Some(5.0), Some(3.0), Some(15.0)),
            clean("a", Some(5.0), Some(3.0), Some(15.005)),
            clean("a", Some(5.0), Some(3.0), Some(16.0)),
            clean("a", None, Some(3.0), Some(16.0)),
        ];
        assert_eq!(count_inconsistent_totals(&records), 1);
    }

    #[test]
    fn cleaner_reports_each_drop_step() {
        let csv = "\
transaction_id,day_of_week,product_name,product_category,store_location,customer_name,price,quantity_sold,total_sale
t1,Monday,Tea,Drinks,Boston,ann,2,1,2
t1,Monday,Tea,Drinks,Boston,ann,2,1,2
,Monday,Tea,Drinks,Boston,bob,2,1,2
t2,,Tea,Drinks,,cat,2,1,2
t3, monday,Tea,Drinks,Boston,dan,2,1,2
t3,Monday,Tea,Drinks,Boston,eve,2,1,2
";
        let table = RawTable::from_csv_str(csv).unwrap();
        let sink = CollectingSink::new();
        let cleaned = Cleaner::new(&sink).clean(table).unwrap();
        let report = &cleaned.report;

        assert_eq!(report.input_rows, 6);
        assert_eq!(report.exact_duplicates_dropped, 1);
        assert_eq!(report.missing_transaction_id_dropped, 1);
        assert_eq!(report.missing_categorical_dropped, 1);
        assert_eq!(report.duplicate_transaction_id_dropped, 1);
        assert_eq!(report.output_rows, 2);
        assert_eq!(cleaned.records[1].customer_name, "Dan");
        assert_eq!(
            sink.issues(),
            vec![CleaningIssue::DuplicateTransactionIds { rows: 2 }]
        );
    }
}
