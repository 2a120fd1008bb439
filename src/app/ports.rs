use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::table::RawTable;

/// Supplies the raw sales table for one run.
#[async_trait]
pub trait ExtractorPort: Send + Sync {
    async fn extract(&self) -> Result<RawTable>;
}

/// Persists a serialized table under a bucket and key.
#[async_trait]
pub trait LoaderPort: Send + Sync {
    async fn upload(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<UploadReceipt>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    pub bytes: usize,
    pub sha256: String,
}
