use std::fs;

use anyhow::Result;
use sales_normalizer::app::etl_use_case::{EtlUseCase, LoadPlan};
use sales_normalizer::domain::{Customer, SaleFact};
use sales_normalizer::infra::fs_loader::sha256_hex;
use sales_normalizer::infra::{FileExtractor, FsObjectLoader};
use tempfile::tempdir;

const RAW: &str = "\
transaction_id,day_of_week,product_name,product_category,store_location,customer_name,price,quantity_sold,total_sale,promo_code
t1,Monday,Tea,Drinks,oslo,ann lee,2.5,2,,SPRING
t2,Tuesday,Tea,Drinks,Oslo,bob,,4,,
t2,Tuesday,Tea,Drinks,Oslo,bob,,4,,
t3,,Cake,Food,Bergen,ann lee,4,-1,4,
";

#[tokio::test]
async fn full_run_writes_all_tables() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("raw.csv");
    fs::write(&input, RAW)?;
    let store_root = dir.path().join("store");

    let use_case = EtlUseCase::with_default_normalizer(
        Box::new(FileExtractor::new(&input)),
        Box::new(FsObjectLoader::new(&store_root)),
        LoadPlan {
            bucket: "databucket-v1".into(),
            output_prefix: "transformed_data".into(),
            upload_raw: true,
        },
    );
    let summary = use_case.run().await?;

    let bucket = store_root.join("databucket-v1");
    let raw_copy = fs::read_to_string(bucket.join("raw_data/sales.csv"))?;
    assert!(raw_copy.starts_with("transaction_id,"));
    assert!(raw_copy.contains("promo_code"));

    let customers: Vec<Customer> = csv::Reader::from_path(bucket.join("transformed_data/customers.csv"))?
        .deserialize()
        .collect::<Result<_, _>>()?;
    assert_eq!(
        customers,
        vec![
            Customer { customer_name: "Ann Lee".into(), customer_id: 1 },
            Customer { customer_name: "Bob".into(), customer_id: 2 },
        ]
    );

    let stores = fs::read_to_string(bucket.join("transformed_data/stores.csv"))?;
    assert_eq!(stores, "store_location,store_id\nOslo,1\nBergen,2\n");

    let products = fs::read_to_string(bucket.join("transformed_data/products.csv"))?;
    assert_eq!(products, "product_name,product_category,product_id\nTea,Drinks,1\nCake,Food,2\n");

    let sales_text = fs::read_to_string(bucket.join("transformed_data/sales.csv"))?;
    assert!(sales_text.starts_with(
        "transaction_id,day_of_week,product_id,customer_id,store_id,price,quantity_sold,total_sale\n"
    ));
    let sales: Vec<SaleFact> = csv::Reader::from_reader(sales_text.as_bytes())
        .deserialize()
        .collect::<Result<_, _>>()?;
    assert_eq!(sales.len(), 3);

    // t1: total derived from 2.5 * 2
    assert_eq!(sales[0].total_sale, Some(5.0));
    // t2: price from the other Tea row
    assert_eq!(sales[1].price, Some(2.5));
    assert_eq!(sales[1].total_sale, Some(10.0));
    // t3: mode day, negative quantity cleared
    assert_eq!(sales[2].day_of_week.as_deref(), Some("Monday"));
    assert_eq!(sales[2].quantity_sold, None);
    assert_eq!(sales[2].customer_id, 1);
    assert_eq!(sales[2].store_id, 2);

    assert_eq!(summary.uploads.len(), 5);
    assert_eq!(summary.uploads[4].key, "transformed_data/sales.csv");
    assert_eq!(summary.uploads[4].sha256, sha256_hex(sales_text.as_bytes()));
    assert_eq!(summary.report.exact_duplicates_dropped, 1);
    assert_eq!(summary.tables.sales, 3);

    Ok(())
}
