use tokio::time::Duration;

pub const SEARCH_URL: &str = "https://www.bus.nl/cgi-bin/search.pl";
pub const SEARCH_FIELD: &str = "suchtext";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub search_url: String,
    pub user_agent: String,
    /// Per request, connect and body included.
    pub timeout: Duration,
    /// Pause between two identifiers.
    pub delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            search_url: SEARCH_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            delay: Duration::from_millis(500),
        }
    }
}
