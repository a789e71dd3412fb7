use crate::{
    catalog::{CatalogClient, CatalogExtractor},
    Extractor, Failure, Fetcher, Pacer, ProductRecord, ResultSet, ScraperConfig, ScraperError,
};
use std::sync::Arc;
use tokio::{sync::watch, time::Duration};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

/// State shared by every request of one batch run.
pub struct RunContext<F> {
    fetcher: F,
    pacer: Pacer,
    progress: watch::Sender<Progress>,
}

impl<F: Fetcher> RunContext<F> {
    pub fn new(fetcher: F, delay: Duration) -> RunContext<F> {
        let (progress, _) = watch::channel(Progress::default());
        RunContext {
            fetcher,
            pacer: Pacer::new(delay),
            progress,
        }
    }

    pub fn progress(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }
}

pub struct BatchRunner<F, E> {
    context: RunContext<F>,
    extractor: Arc<E>,
}

impl BatchRunner<CatalogClient, CatalogExtractor> {
    pub fn catalog(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = CatalogClient::new(config)?;
        Ok(BatchRunner::new(
            RunContext::new(client, config.delay),
            CatalogExtractor,
        ))
    }
}

impl<F, E> BatchRunner<F, E>
where
    F: Fetcher + Send + Sync,
    E: Extractor + Send + Sync + 'static,
{
    pub fn new(context: RunContext<F>, extractor: E) -> BatchRunner<F, E> {
        BatchRunner {
            context,
            extractor: Arc::new(extractor),
        }
    }

    pub fn progress(&self) -> watch::Receiver<Progress> {
        self.context.progress()
    }

    /// Scrapes every non-blank row in order. Per identifier failures end up as
    /// failure records; only an input without identifiers is an error.
    pub async fn run<I, S>(&mut self, rows: I) -> Result<ResultSet, ScraperError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows = rows.into_iter().peekable();
        if rows.peek().is_none() {
            return Err(ScraperError::EmptyInput);
        }

        let identifiers = rows
            .map(|row| row.as_ref().trim().to_string())
            .filter(|identifier| !identifier.is_empty())
            .collect::<Vec<_>>();
        if identifiers.is_empty() {
            return Err(ScraperError::NoIdentifiers);
        }

        let total = identifiers.len();
        self.context
            .progress
            .send_replace(Progress { processed: 0, total });
        info!(
            "Scraping {} identifiers, {:?} apart",
            total,
            self.context.pacer.interval()
        );

        let mut results = Vec::with_capacity(total);
        for (i, identifier) in identifiers.iter().enumerate() {
            self.context.pacer.acquire().await;
            let record = self.process(identifier).await;
            self.context.pacer.release();

            if record.is_scraped() {
                info!("[{}/{}] {}", i + 1, total, record);
            }
            results.push(record);
            self.context.progress.send_replace(Progress {
                processed: i + 1,
                total,
            });
        }

        let failed = results.iter().filter(|r| !r.is_scraped()).count();
        info!(
            "Finished batch: {} scraped, {} failed",
            results.len() - failed,
            failed
        );
        Ok(results)
    }

    async fn process(&self, identifier: &str) -> ProductRecord {
        let html = match self.context.fetcher.fetch(identifier).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Fetching {} failed: {}", identifier, e);
                return ProductRecord::failed(identifier, Failure::Fetch);
            }
        };

        let extractor = Arc::clone(&self.extractor);
        let owned = identifier.to_string();
        match tokio::task::spawn_blocking(move || extractor.extract_html(&html, &owned)).await {
            Ok(record) => record,
            Err(e) => {
                error!("Processing {} failed: {}", identifier, ScraperError::from(e));
                ProductRecord::failed(identifier, Failure::Processing)
            }
        }
    }
}
