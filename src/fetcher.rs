use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::config::{Config, MAX_REDIRECTS, USER_AGENT};
use crate::error::{AppError, Result};

/// Single-attempt page fetcher. One client (and its headers) is shared across
/// a run; building a fresh one per call would behave the same.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            // The site's certificate chain is not reliably valid.
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body. Transport errors, timeouts, non-2xx
    /// statuses and unreadable bodies all surface as `AppError::Fetch`.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let fetch_err = |e: reqwest::Error| AppError::Fetch {
            url: url.to_string(),
            reason: error_chain(e.without_url()),
        };

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?;

        let status = resp.status();
        let body = resp.text().await.map_err(fetch_err)?;
        debug!("[FETCH] {url} -> {status} ({} bytes)", body.len());
        Ok(body)
    }
}

/// `outer: inner: root` so the transport cause (refused, timed out, DNS)
/// survives into the message.
fn error_chain(e: reqwest::Error) -> String {
    std::iter::successors(Some(&e as &dyn std::error::Error), |e| e.source())
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
