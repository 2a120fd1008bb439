pub mod csv_extractor;
pub mod fs_loader;

pub use csv_extractor::{FileExtractor, HttpCsvExtractor};
pub use fs_loader::FsObjectLoader;
