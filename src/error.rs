use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// A structurally required column is missing from the raw table.
    #[error("Schema error: required column '{column}' is missing")]
    Schema { column: String },

    /// A cleaned row failed to resolve against a dimension built from the same rows.
    #[error("Consistency error: {dimension} key {key:?} for transaction '{transaction_id}' has no dimension row")]
    Consistency {
        dimension: &'static str,
        key: String,
        transaction_id: String,
    },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtlError {
    pub fn schema(column: impl Into<String>) -> Self {
        EtlError::Schema {
            column: column.into(),
        }
    }

    pub fn upload(key: impl Into<String>, message: impl ToString) -> Self {
        EtlError::Upload {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Structural failures abort a run; everything else in the core is repaired and logged.
    pub fn is_structural(&self) -> bool {
        matches!(self, EtlError::Schema { .. } | EtlError::Consistency { .. })
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
