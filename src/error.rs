use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Any failure to retrieve a page: transport, timeout, non-2xx status or
    /// unreadable body. Isolated per currency by the coordinator.
    #[error("Failed to fetch HTML from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, AppError::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
