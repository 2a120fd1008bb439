use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::app::ports::{ExtractorPort, LoaderPort, UploadReceipt};
use crate::config::PipelineConfig;
use crate::constants::{table_key, RAW_TABLE_KEY};
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::normalize::{DefaultNormalizer, Normalizer};
use crate::pipeline::processing::report::CleaningReport;

/// Where the tables of a run are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    pub bucket: String,
    pub output_prefix: String,
    pub upload_raw: bool,
}

impl From<&PipelineConfig> for LoadPlan {
    fn from(cfg: &PipelineConfig) -> Self {
        Self {
            bucket: cfg.bucket.clone(),
            output_prefix: cfg.output_prefix.clone(),
            upload_raw: cfg.upload_raw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub customers: usize,
    pub stores: usize,
    pub products: usize,
    pub sales: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tables: TableCounts,
    pub uploads: Vec<UploadReceipt>,
    pub report: CleaningReport,
}

/// Extract, normalize, then upload each table in a fixed order.
///
/// Uploads are fail-fast: the first failure ends the run and later tables are
/// not attempted. Nothing records which uploads already succeeded.
pub struct EtlUseCase {
    extractor: Box<dyn ExtractorPort>,
    normalizer: Box<dyn Normalizer + Send + Sync>,
    loader: Box<dyn LoaderPort>,
    plan: LoadPlan,
}

impl EtlUseCase {
    pub fn new(
        extractor: Box<dyn ExtractorPort>,
        normalizer: Box<dyn Normalizer + Send + Sync>,
        loader: Box<dyn LoaderPort>,
        plan: LoadPlan,
    ) -> Self {
        Self {
            extractor,
            normalizer,
            loader,
            plan,
        }
    }

    /// Create a use case with the default normalizer
    pub fn with_default_normalizer(
        extractor: Box<dyn ExtractorPort>,
        loader: Box<dyn LoaderPort>,
        plan: LoadPlan,
    ) -> Self {
        Self::new(extractor, Box::new(DefaultNormalizer::default()), loader, plan)
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("etl_run", run_id = %run_id);
        self.run_inner(run_id).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid) -> Result<RunSummary> {
        let started_at = Utc::now();

        let start = Instant::now();
        let raw = match self.extractor.extract().await {
            Ok(raw) => raw,
            Err(e) => {
                metrics::extract::error();
                error!("Extraction failed: {}", e);
                return Err(e);
            }
        };
        let elapsed = start.elapsed().as_secs_f64();
        metrics::extract::success(raw.len(), elapsed);
        info!("Extracted {} records in {:.2} seconds", raw.len(), elapsed);

        let raw_csv = if self.plan.upload_raw {
            Some(raw.to_csv_bytes()?)
        } else {
            None
        };

        let tables = self.normalizer.normalize(raw).map_err(|e| {
            error!("Normalization failed: {}", e);
            e
        })?;

        let mut uploads = Vec::new();
        if let Some(body) = raw_csv {
            uploads.push(self.upload("raw", RAW_TABLE_KEY.to_string(), body).await?);
        }
        for (name, body) in tables.to_csv_tables()? {
            let key = table_key(&self.plan.output_prefix, name);
            uploads.push(self.upload(name, key, body).await?);
        }

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            tables: TableCounts {
                customers: tables.customers.len(),
                stores: tables.stores.len(),
                products: tables.products.len(),
                sales: tables.sales.len(),
            },
            uploads,
            report: tables.report,
        };
        info!(uploads = summary.uploads.len(), "Pipeline finished");
        Ok(summary)
    }

    async fn upload(&self, table: &'static str, key: String, body: Vec<u8>) -> Result<UploadReceipt> {
        let bytes = body.len();
        let start = Instant::now();
        match self.loader.upload(&self.plan.bucket, &key, body).await {
            Ok(receipt) => {
                let elapsed = start.elapsed().as_secs_f64();
                metrics::load::upload_success(table, bytes, elapsed);
                info!("Uploaded {} to {}/{} in {:.2} seconds", table, self.plan.bucket, key, elapsed);
                Ok(receipt)
            }
            Err(e) => {
                metrics::load::upload_error(table);
                error!("Failed to upload {} to {}/{}: {}", table, self.plan.bucket, key, e);
                Err(e)
            }
        }
    }
}
