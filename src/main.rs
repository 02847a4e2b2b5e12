mod config;
mod error;
mod extractor;
mod fetcher;
mod registry;
mod report;
mod scrape;
mod types;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, SERVER_ERROR_MESSAGE};
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::registry::{parse_base_url, CURRENCIES};
use crate::report::{emit, render_failure, render_success};
use crate::scrape::Scraper;
use crate::types::FailureReport;

/// What the process prints, and whether it reports success.
#[derive(Debug)]
struct Outcome {
    document: String,
    ok: bool,
}

#[tokio::main]
async fn main() {
    let cfg = Config::from_env();

    let log_level = cfg
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    let (cfg, mut outcome) = match cfg {
        Ok(c) => {
            let outcome = execute(&c).await;
            (c, outcome)
        }
        Err(e) => {
            error!("Config error: {e}");
            (Config::default(), failure_outcome())
        }
    };

    if let Err(e) = emit(&outcome.document, cfg.output_path.as_deref()) {
        // Fall back to stdout if the configured output is what broke.
        error!("Could not write report: {e}");
        outcome = failure_outcome();
        if let Err(e) = emit(&outcome.document, None) {
            error!("Could not write failure report: {e}");
        }
    }

    if !outcome.ok && cfg.strict_exit {
        std::process::exit(1);
    }
}

/// Catastrophic boundary: any error escaping `run` becomes the generic
/// failure document. The cause is logged, never printed.
async fn execute(cfg: &Config) -> Outcome {
    match run(cfg).await {
        Ok(document) => Outcome { document, ok: true },
        Err(e) => {
            error!("Fatal error: {e}");
            failure_outcome()
        }
    }
}

async fn run(cfg: &Config) -> Result<String> {
    let base_url = parse_base_url(&cfg.base_url)?;
    let fetcher = Fetcher::new(cfg)?;
    info!(
        "Scraping {} currencies from {base_url} (timeout={}s)",
        CURRENCIES.len(),
        cfg.timeout_secs,
    );

    let scraper = Scraper::new(fetcher, base_url, CURRENCIES);
    let report = scraper.scrape().await?;
    render_success(&report)
}

fn failure_outcome() -> Outcome {
    let document = render_failure(&FailureReport::new(SERVER_ERROR_MESSAGE)).unwrap_or_else(|e| {
        error!("Could not encode failure report: {e}");
        String::new()
    });
    Outcome {
        document,
        ok: false,
    }
}
