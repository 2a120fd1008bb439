use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    BUCKET_ENV, DEFAULT_OUTPUT_PREFIX, DEFAULT_SOURCE_ENDPOINT, DEFAULT_SOURCE_ROW_COUNT,
    DEFAULT_STORAGE_ROOT,
};
use crate::error::{EtlError, Result};

/// Contents of the optional TOML config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bucket: Option<String>,
    pub output_prefix: Option<String>,
    pub upload_raw: Option<bool>,
    pub storage_root: Option<PathBuf>,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub endpoint: String,
    pub row_count: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SOURCE_ENDPOINT.to_string(),
            row_count: DEFAULT_SOURCE_ROW_COUNT,
        }
    }
}

/// Values given on the command line; they win over the file and environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub bucket: Option<String>,
    pub upload_raw: bool,
    pub storage_root: Option<PathBuf>,
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Output location namespace. Required.
    pub bucket: String,
    pub output_prefix: String,
    pub upload_raw: bool,
    pub storage_root: PathBuf,
    pub source: SourceConfig,
}

impl PipelineConfig {
    /// Load settings from an optional TOML file, the environment and CLI overrides,
    /// in increasing order of precedence.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let file = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    EtlError::Config(format!(
                        "Failed to read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                toml::from_str(&content)?
            }
            None => FileConfig::default(),
        };

        let env_bucket = std::env::var(BUCKET_ENV).ok();
        Self::resolve(file, env_bucket, overrides)
    }

    pub fn resolve(
        file: FileConfig,
        env_bucket: Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let bucket = overrides
            .bucket
            .or(env_bucket)
            .or(file.bucket)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                EtlError::Config(format!(
                    "no output bucket configured; set `bucket` in the config file, {} or --bucket",
                    BUCKET_ENV
                ))
            })?;

        Ok(Self {
            bucket,
            output_prefix: file
                .output_prefix
                .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
            upload_raw: overrides.upload_raw || file.upload_raw.unwrap_or(false),
            storage_root: overrides
                .storage_root
                .or(file.storage_root)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_ROOT)),
            source: file.source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bucket_is_fatal() {
        let err = PipelineConfig::resolve(FileConfig::default(), None, ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, EtlError::Config(_)));

        let blank = ConfigOverrides {
            bucket: Some("  ".into()),
            ..Default::default()
        };
        assert!(PipelineConfig::resolve(FileConfig::default(), None, blank).is_err());
    }

    #[test]
    fn overrides_win_over_env_and_file() {
        let file: FileConfig = toml::from_str(
            r#"
            bucket = "from-file"
            output_prefix = "out"
            upload_raw = true

            [source]
            row_count = 50
            "#,
        )
        .unwrap();
        let overrides = ConfigOverrides {
            bucket: Some("from-cli".into()),
            ..Default::default()
        };
        let cfg = PipelineConfig::resolve(file, Some("from-env".into()), overrides).unwrap();
        assert_eq!(cfg.bucket, "from-cli");
        assert_eq!(cfg.output_prefix, "out");
        assert!(cfg.upload_raw);
        assert_eq!(cfg.source.row_count, 50);
        assert_eq!(cfg.source.endpoint, DEFAULT_SOURCE_ENDPOINT);
    }

    #[test]
    fn env_bucket_used_when_file_has_none() {
        let cfg = PipelineConfig::resolve(
            FileConfig::default(),
            Some("databucket-v1".into()),
            ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(cfg.bucket, "databucket-v1");
        assert_eq!(cfg.output_prefix, DEFAULT_OUTPUT_PREFIX);
        assert!(!cfg.upload_raw);
        assert_eq!(cfg.storage_root, PathBuf::from(DEFAULT_STORAGE_ROOT));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("buckett = \"x\"").is_err());
    }
}
