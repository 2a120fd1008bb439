// Pipeline processing: schema resolution, cleaning, and normalization

pub mod clean;
pub mod normalize;
pub mod report;
pub mod schema;
