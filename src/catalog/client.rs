use crate::{config::SEARCH_FIELD, Fetcher, ScraperConfig, ScraperError};
use reqwest::{header, Client};
use tracing::debug;

/// HTTP side of a batch run. The inner client keeps its connection pool and
/// cookies for as long as the batch lives.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    search_url: String,
}

impl CatalogClient {
    pub fn new(config: &ScraperConfig) -> Result<CatalogClient, ScraperError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(CatalogClient {
            client,
            search_url: config.search_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for CatalogClient {
    async fn fetch(&self, identifier: &str) -> Result<String, ScraperError> {
        debug!("Search {} at {}", identifier, self.search_url);
        let response = self
            .client
            .post(self.search_url.as_str())
            .header(header::ACCEPT, "text/html")
            .form(&[(SEARCH_FIELD, identifier)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status(status));
        }

        Ok(response.text().await?)
    }
}
