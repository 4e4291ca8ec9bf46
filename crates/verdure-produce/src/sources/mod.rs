//! Outbound HTTP clients feeding the curation pipeline.

pub mod openfoodfacts;
pub mod unsplash;
