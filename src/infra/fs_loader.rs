use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::app::ports::{LoaderPort, UploadReceipt};
use crate::error::{EtlError, Result};

/// Object-store stand-in backed by a local directory: objects live at
/// `<root>/<bucket>/<key>`.
pub struct FsObjectLoader {
    root: PathBuf,
}

impl FsObjectLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of an object. Bucket and key must stay inside the root.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        for (what, value) in [("bucket", bucket), ("key", key)] {
            if !is_relative_inside(Path::new(value)) {
                return Err(EtlError::upload(key, format!("invalid {} '{}'", what, value)));
            }
        }
        Ok(self.root.join(bucket).join(key))
    }
}

fn is_relative_inside(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[async_trait]
impl LoaderPort for FsObjectLoader {
    async fn upload(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<UploadReceipt> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| EtlError::upload(key, e))?;
        }

        let digest = sha256_hex(&body);
        let bytes = body.len();
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| EtlError::upload(key, e))?;
        debug!(path = %path.display(), bytes, sha256 = %digest, "Wrote object");

        Ok(UploadReceipt {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
            sha256: digest,
        })
    }
}
