// Data processing pipeline: cleaning and normalization of the raw sales table

pub mod processing;

pub use processing::normalize::{DefaultNormalizer, Normalizer};
