pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod table;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;

pub mod observability;

pub use domain::NormalizedTables;
pub use error::{EtlError, Result};
pub use pipeline::{DefaultNormalizer, Normalizer};
pub use table::RawTable;
