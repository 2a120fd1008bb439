//! Row shapes of the normalized sales schema.

use serde::{Deserialize, Serialize};

use crate::constants::{CUSTOMERS_TABLE, PRODUCTS_TABLE, SALES_TABLE, STORES_TABLE};
use crate::error::Result;
use crate::pipeline::processing::report::CleaningReport;
use crate::table::{rows_to_csv_bytes, TableRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_name: String,
    pub customer_id: u32,
}

impl TableRow for Customer {
    const COLUMNS: &'static [&'static str] = &["customer_name", "customer_id"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub store_location: String,
    pub store_id: u32,
}

impl TableRow for Store {
    const COLUMNS: &'static [&'static str] = &["store_location", "store_id"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_name: String,
    pub product_category: String,
    pub product_id: u32,
}

impl TableRow for Product {
    const COLUMNS: &'static [&'static str] = &["product_name", "product_category", "product_id"];
}

/// One cleaned transaction, keyed into the three dimension tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleFact {
    pub transaction_id: String,
    pub day_of_week: Option<String>,
    pub product_id: u32,
    pub customer_id: u32,
    pub store_id: u32,
    pub price: Option<f64>,
    pub quantity_sold: Option<i64>,
    pub total_sale: Option<f64>,
}

impl TableRow for SaleFact {
    const COLUMNS: &'static [&'static str] = &[
        "transaction_id",
        "day_of_week",
        "product_id",
        "customer_id",
        "store_id",
        "price",
        "quantity_sold",
        "total_sale",
    ];
}

/// The four output tables plus the cleaning diagnostics that produced them.
#[derive(Debug, Clone)]
pub struct NormalizedTables {
    pub customers: Vec<Customer>,
    pub stores: Vec<Store>,
    pub products: Vec<Product>,
    pub sales: Vec<SaleFact>,
    pub report: CleaningReport,
}

impl NormalizedTables {
    /// CSV bodies of the four tables, in upload order.
    pub fn to_csv_tables(&self) -> Result<[(&'static str, Vec<u8>); 4]> {
        Ok([
            (CUSTOMERS_TABLE, rows_to_csv_bytes(&self.customers)?),
            (STORES_TABLE, rows_to_csv_bytes(&self.stores)?),
            (PRODUCTS_TABLE, rows_to_csv_bytes(&self.products)?),
            (SALES_TABLE, rows_to_csv_bytes(&self.sales)?),
        ])
    }
}
