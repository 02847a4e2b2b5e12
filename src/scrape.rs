use chrono::Local;
use tracing::{info, warn};
use url::Url;

use crate::config::{FETCH_ERROR_PREFIX, UPDATED_FORMAT};
use crate::error::Result;
use crate::extractor::extract_price;
use crate::fetcher::Fetcher;
use crate::registry::{currency_url, CurrencyDefinition};
use crate::types::{AggregateResult, Currencies, CurrencyResult};

#[derive(Debug, Default)]
pub struct ScrapeStats {
    pub succeeded: usize,
    pub failed: usize,
    pub rows: usize,
}

/// Drives the registry through fetch → extract, one currency at a time.
pub struct Scraper {
    fetcher: Fetcher,
    base_url: Url,
    registry: &'static [CurrencyDefinition],
}

impl Scraper {
    pub fn new(fetcher: Fetcher, base_url: Url, registry: &'static [CurrencyDefinition]) -> Self {
        Self {
            fetcher,
            base_url,
            registry,
        }
    }

    /// One full pass over the registry. A fetch failure is recorded against
    /// its currency and the pass continues; only non-fetch errors escape.
    pub async fn scrape(&self) -> Result<AggregateResult> {
        let mut currencies = Currencies::default();
        let mut stats = ScrapeStats::default();

        for def in self.registry {
            let result = self.scrape_currency(def).await?;
            match &result {
                CurrencyResult::Success { data, .. } => {
                    stats.succeeded += 1;
                    stats.rows += data.len();
                }
                CurrencyResult::Failure { .. } => stats.failed += 1,
            }
            currencies.insert(def.name, result);
        }

        if currencies.is_empty() {
            warn!("[SCRAPE] registry is empty, nothing scraped");
        }

        info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            rows = stats.rows,
            "[SCRAPE] pass complete: {} ok, {} failed, {} rows",
            stats.succeeded,
            stats.failed,
            stats.rows,
        );

        Ok(AggregateResult {
            ok: true,
            updated: Local::now().format(UPDATED_FORMAT).to_string(),
            currencies,
        })
    }

    async fn scrape_currency(&self, def: &CurrencyDefinition) -> Result<CurrencyResult> {
        let url = currency_url(&self.base_url, def)?;
        info!("[SCRAPE] {} → {url}", def.name);

        let document = match self.fetcher.fetch(&url).await {
            Ok(doc) => doc,
            Err(e) if e.is_fetch() => {
                warn!("[SCRAPE] {} failed: {e}", def.name);
                return Ok(CurrencyResult::failure(
                    format!("{FETCH_ERROR_PREFIX}{e}"),
                    def.flag,
                ));
            }
            Err(e) => return Err(e),
        };

        let extraction = extract_price(&document, def.name);
        if extraction.data.is_empty() {
            warn!("[SCRAPE] {}: no matching rows on page", def.name);
        } else {
            info!(
                "[SCRAPE] {}: {} row(s), date={}",
                def.name,
                extraction.data.len(),
                extraction.date.as_deref().unwrap_or("n/a"),
            );
        }
        Ok(CurrencyResult::success(extraction, def.flag))
    }
}
