use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tracing::info;

use crate::domain::{Customer, NormalizedTables, Product, SaleFact, Store};
use crate::error::{EtlError, Result};
use crate::observability::metrics;
use crate::pipeline::processing::clean::{CleanRecord, Cleaner};
use crate::pipeline::processing::report::{DiagnosticsSink, TracingSink};
use crate::table::RawTable;

/// Turns one raw sales table into the customer, store, product and sales tables.
pub trait Normalizer {
    /// Consumes the raw table; callers keep no view of the working copy.
    fn normalize(&self, raw: RawTable) -> Result<NormalizedTables>;
}

/// Cleans the raw table, derives the dimensions from the cleaned rows and keys
/// every row into them.
pub struct DefaultNormalizer {
    sink: Arc<dyn DiagnosticsSink>,
}

impl Default for DefaultNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl DefaultNormalizer {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { sink }
    }
}

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, raw: RawTable) -> Result<NormalizedTables> {
        info!("Starting data transformation...");
        let cleaned = Cleaner::new(self.sink.as_ref()).clean(raw)?;

        info!("Creating normalized tables for customers, stores, products, and sales...");
        let customers = DimensionIndex::build(&cleaned.records, |r| r.customer_name.clone());
        let stores = DimensionIndex::build(&cleaned.records, |r| r.store_location.clone());
        let products = DimensionIndex::build(&cleaned.records, |r| {
            (r.product_name.clone(), r.product_category.clone())
        });

        let sales = cleaned
            .records
            .iter()
            .map(|r| {
                Ok(SaleFact {
                    transaction_id: r.transaction_id.clone(),
                    day_of_week: r.day_of_week.clone(),
                    product_id: products.resolve(
                        "product",
                        &(r.product_name.clone(), r.product_category.clone()),
                        r,
                    )?,
                    customer_id: customers.resolve("customer", &r.customer_name, r)?,
                    store_id: stores.resolve("store", &r.store_location, r)?,
                    price: r.price,
                    quantity_sold: r.quantity_sold.map(|q| q as i64),
                    total_sale: r.total_sale,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let tables = NormalizedTables {
            customers: customers
                .into_rows(|customer_name, customer_id| Customer { customer_name, customer_id }),
            stores: stores.into_rows(|store_location, store_id| Store { store_location, store_id }),
            products: products.into_rows(|(product_name, product_category), product_id| Product {
                product_name,
                product_category,
                product_id,
            }),
            sales,
            report: cleaned.report,
        };

        metrics::normalize::tables_built(
            tables.customers.len(),
            tables.stores.len(),
            tables.products.len(),
            tables.sales.len(),
        );
        info!(
            customers = tables.customers.len(),
            stores = tables.stores.len(),
            products = tables.products.len(),
            sales = tables.sales.len(),
            "Data transformation complete."
        );
        Ok(tables)
    }
}

/// Distinct natural keys in first-seen order, with ids `1..=N` by position.
#[derive(Debug)]
pub struct DimensionIndex<K> {
    keys: Vec<K>,
    ids: HashMap<K, u32>,
}

impl<K: Clone + Eq + Hash + std::fmt::Debug> DimensionIndex<K> {
    pub fn build<F>(records: &[CleanRecord], key: F) -> Self
    where
        F: Fn(&CleanRecord) -> K,
    {
        let mut keys = Vec::new();
        let mut ids = HashMap::new();
        for record in records {
            let k = key(record);
            if !ids.contains_key(&k) {
                keys.push(k.clone());
                ids.insert(k, keys.len() as u32);
            }
        }
        Self { keys, ids }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn id_of(&self, key: &K) -> Option<u32> {
        self.ids.get(key).copied()
    }

    /// Look up a row's key. A miss means the dimension was not built from the
    /// same rows and is reported as a consistency failure.
    fn resolve(&self, dimension: &'static str, key: &K, record: &CleanRecord) -> Result<u32> {
        self.id_of(key).ok_or_else(|| EtlError::Consistency {
            dimension,
            key: format!("{:?}", key),
            transaction_id: record.transaction_id.clone(),
        })
    }

    pub fn into_rows<T, F>(self, row: F) -> Vec<T>
    where
        F: Fn(K, u32) -> T,
    {
        self.keys
            .into_iter()
            .enumerate()
            .map(|(i, k)| row(k, i as u32 + 1))
            .collect()
    }
}
