//! Error types for breach lookups

use thiserror::Error;

/// Raised before a search starts; never reaches `SearchState`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an email or domain to search")]
    EmptyQuery,
}

/// Failures a lookup source can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Endpoint unreachable, connection dropped, or non-2xx status
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Parse(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Parse(err.to_string())
    }
}

/// Configuration problems detected while selecting a lookup source
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source kind `remote` requires `source.base_url`")]
    MissingBaseUrl,

    #[error("invalid base url `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("endpoint template for {mode} must contain `{{query}}`")]
    EndpointTemplate { mode: &'static str },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
