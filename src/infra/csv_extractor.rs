use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::app::ports::ExtractorPort;
use crate::config::SourceConfig;
use crate::constants::API_KEY_ENV;
use crate::error::{EtlError, Result};
use crate::table::RawTable;

/// Fetches the raw sales table as CSV from a Mockaroo-style endpoint
/// (`{endpoint}?count={rows}&key={api_key}`).
pub struct HttpCsvExtractor {
    client: reqwest::Client,
    endpoint: String,
    row_count: u32,
    api_key: Option<String>,
}

impl HttpCsvExtractor {
    pub fn new(endpoint: impl Into<String>, row_count: u32, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            row_count,
            api_key,
        }
    }

    /// Build from config, taking the API key from the environment.
    pub fn from_env(source: &SourceConfig) -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self::new(source.endpoint.clone(), source.row_count, api_key)
    }
}

#[async_trait]
impl ExtractorPort for HttpCsvExtractor {
    async fn extract(&self) -> Result<RawTable> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EtlError::Extraction(format!("{} environment variable not set", API_KEY_ENV)))?;

        info!("Starting data extraction from {}", self.endpoint);
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("count", self.row_count.to_string()), ("key", api_key.to_string())])
            .send()
            .await
            .map_err(|e| EtlError::Extraction(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EtlError::Extraction(format!(
                "{} responded with status {}",
                self.endpoint, status
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| EtlError::Extraction(e.without_url().to_string()))?;
        debug!(bytes = bytes.len(), "Received CSV payload");
        RawTable::from_csv_reader(&bytes[..])
    }
}

/// Reads the raw sales table from a local CSV file.
pub struct FileExtractor {
    path: PathBuf,
}

impl FileExtractor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ExtractorPort for FileExtractor {
    async fn extract(&self) -> Result<RawTable> {
        info!("Starting data extraction from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            EtlError::Extraction(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        RawTable::from_csv_reader(bytes.as_slice())
    }
}
