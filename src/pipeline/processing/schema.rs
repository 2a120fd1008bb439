use crate::constants::{
    CUSTOMER_NAME, DAY_OF_WEEK, PRICE, PRODUCT_CATEGORY, PRODUCT_NAME, QUANTITY_SOLD,
    STORE_LOCATION, TOTAL_SALE, TRANSACTION_ID,
};
use crate::error::{EtlError, Result};
use crate::table::RawTable;

/// Column positions of the known sales fields within a raw table.
///
/// The key columns are required because the dimension tables are derived from
/// them. The remaining fields are optional and are handled explicitly by the
/// cleaning steps when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSchema {
    pub transaction_id: usize,
    pub product_name: usize,
    pub product_category: usize,
    pub store_location: usize,
    pub customer_name: usize,
    pub day_of_week: Option<usize>,
    pub price: Option<usize>,
    pub quantity_sold: Option<usize>,
    pub total_sale: Option<usize>,
}

impl RawSchema {
    pub fn resolve(table: &RawTable) -> Result<Self> {
        let required = |name: &str| table.column_index(name).ok_or_else(|| EtlError::schema(name));

        Ok(Self {
            transaction_id: required(TRANSACTION_ID)?,
            product_name: required(PRODUCT_NAME)?,
            product_category: required(PRODUCT_CATEGORY)?,
            store_location: required(STORE_LOCATION)?,
            customer_name: required(CUSTOMER_NAME)?,
            day_of_week: table.column_index(DAY_OF_WEEK),
            price: table.column_index(PRICE),
            quantity_sold: table.column_index(QUANTITY_SOLD),
            total_sale: table.column_index(TOTAL_SALE),
        })
    }

    pub fn has_day_of_week(&self) -> bool {
        self.day_of_week.is_some()
    }

    /// Project a raw row onto the known fields. Columns outside the schema are discarded.
    pub fn record(&self, row: &[Option<String>]) -> RawRecord {
        let cell = |idx: usize| row.get(idx).cloned().flatten();
        let optional = |idx: Option<usize>| idx.and_then(cell);

        RawRecord {
            transaction_id: cell(self.transaction_id),
            day_of_week: optional(self.day_of_week),
            product_name: cell(self.product_name),
            product_category: cell(self.product_category),
            store_location: cell(self.store_location),
            customer_name: cell(self.customer_name),
            price: optional(self.price),
            quantity_sold: optional(self.quantity_sold),
            total_sale: optional(self.total_sale),
        }
    }
}

/// One raw transaction, all fields still textual and possibly missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub transaction_id: Option<String>,
    pub day_of_week: Option<String>,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub store_location: Option<String>,
    pub customer_name: Option<String>,
    pub price: Option<String>,
    pub quantity_sold: Option<String>,
    pub total_sale: Option<String>,
}
