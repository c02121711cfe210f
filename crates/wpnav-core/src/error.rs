use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("not configured: run 'wpnav init'")]
    NotConfigured,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },

    #[error("mega menu not found for title: {0}")]
    MegaMenuNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NavError {
    /// True for every failure that the navigation layer treats as "the data
    /// is not there": transport errors, timeouts, bad status codes and
    /// payloads it could not decode.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            NavError::Http { .. }
                | NavError::Timeout { .. }
                | NavError::Status { .. }
                | NavError::Payload { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
