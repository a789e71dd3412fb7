mod client;
mod extractor;

pub use client::CatalogClient;
pub use extractor::CatalogExtractor;
