use bus_catalog_scraper::{
    report::{self, OutputFormat},
    BatchRunner, ScraperConfig,
};
use clap::Parser;
use std::path::PathBuf;
use tokio::time::Duration;
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Looks up article numbers in the bus.nl catalog and writes name, price and
/// packaging unit per article.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// CSV file, article numbers in the first column
    input: PathBuf,

    /// Report file, defaults to bus_nl_scraped_data_<timestamp>.<format>
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    #[arg(long, default_value = bus_catalog_scraper::config::SEARCH_URL)]
    search_url: String,

    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

impl Cli {
    fn config(&self) -> ScraperConfig {
        ScraperConfig {
            search_url: self.search_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            delay: Duration::from_millis(self.delay_ms),
            ..ScraperConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();
    let identifiers = report::load_identifiers(&cli.input)?;

    let mut runner = BatchRunner::catalog(&cli.config())?;
    let results = match runner.run(identifiers).await {
        Ok(results) => results,
        Err(e) if e.is_batch_notice() => {
            warn!("{}: {}", cli.input.display(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let output = cli.output.clone().unwrap_or_else(|| {
        PathBuf::from(report::default_output_name(chrono::Utc::now(), cli.format))
    });
    report::write_report(&output, cli.format, &results)?;
    info!(
        "Scraping done, {} articles written to {}",
        results.len(),
        output.display()
    );

    Ok(())
}
