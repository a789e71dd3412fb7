use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file {0:?} is not a .csv file")]
    UnsupportedInput(PathBuf),

    #[error("Input is empty")]
    EmptyInput,

    #[error("Input contains no identifiers in the first column")]
    NoIdentifiers,

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ScraperError {
    /// Errors that describe the whole batch rather than a single identifier.
    pub fn is_batch_notice(&self) -> bool {
        matches!(self, ScraperError::EmptyInput | ScraperError::NoIdentifiers)
    }
}
