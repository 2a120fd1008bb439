/// Column names of the raw sales table. These are the only columns the
/// pipeline understands; any others are carried verbatim in the raw table
/// and ignored by the normalizer.
pub const TRANSACTION_ID: &str = "transaction_id";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const PRODUCT_NAME: &str = "product_name";
pub const PRODUCT_CATEGORY: &str = "product_category";
pub const STORE_LOCATION: &str = "store_location";
pub const CUSTOMER_NAME: &str = "customer_name";
pub const PRICE: &str = "price";
pub const QUANTITY_SOLD: &str = "quantity_sold";
pub const TOTAL_SALE: &str = "total_sale";

/// Cell spellings treated as missing when a CSV is read.
pub const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
    "#NA",
];

/// Maximum tolerated |total_sale - price * quantity_sold| before a row is reported as inconsistent.
pub const TOTAL_SALE_TOLERANCE: f64 = 0.01;

// Object keys for the uploaded tables
pub const DEFAULT_OUTPUT_PREFIX: &str = "transformed_data";
pub const RAW_TABLE_KEY: &str = "raw_data/sales.csv";
pub const CUSTOMERS_TABLE: &str = "customers";
pub const STORES_TABLE: &str = "stores";
pub const PRODUCTS_TABLE: &str = "products";
pub const SALES_TABLE: &str = "sales";

// Environment variables
pub const BUCKET_ENV: &str = "SALES_NORMALIZER_BUCKET";
pub const API_KEY_ENV: &str = "MOCKAROO_API_KEY";

pub const DEFAULT_SOURCE_ENDPOINT: &str = "https://api.mockaroo.com/api/0935e020";
pub const DEFAULT_SOURCE_ROW_COUNT: u32 = 200;
pub const DEFAULT_STORAGE_ROOT: &str = "object_store";

/// Build the object key for one of the normalized tables.
pub fn table_key(prefix: &str, table: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}.csv", table)
    } else {
        format!("{}/{}.csv", prefix, table)
    }
}
