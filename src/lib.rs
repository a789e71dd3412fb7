use scraper::Html;

pub mod batch;
pub mod catalog;
pub mod config;
pub mod report;

mod data;
mod error;
mod pacer;

pub use batch::{BatchRunner, Progress, RunContext};
pub use config::ScraperConfig;
pub use data::{Failure, Field, ProductRecord, ResultSet};
pub use error::ScraperError;
pub use pacer::Pacer;

/// Turns one search response into a record. Misses are reported through
/// [`Field`], never as errors.
pub trait Extractor {
    fn extract(&self, doc: &Html, identifier: &str) -> ProductRecord;

    fn extract_html(&self, html: &str, identifier: &str) -> ProductRecord {
        let doc = Html::parse_document(html);
        self.extract(&doc, identifier)
    }
}

/// Retrieves the search response markup for one identifier.
#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, identifier: &str) -> Result<String, ScraperError>;
}
