//! Lookup source traits and HTTP exchange types

use crate::breach::RawBreachRecord;
use crate::error::LookupError;
use crate::query::SearchQuery;
use async_trait::async_trait;
use std::collections::HashMap;

/// HTTP request built by a remote source
#[derive(Debug, Clone)]
pub struct SourceRequest {
    /// URL to request
    pub url: String,
    /// Extra request headers
    pub headers: HashMap<String, String>,
}

impl SourceRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }
}

/// HTTP response handed back to a remote source for parsing
#[derive(Debug)]
pub struct SourceResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl SourceResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where breach records come from
#[async_trait]
pub trait LookupSource: Send + Sync {
    /// Short identifier used in logs and the API
    fn name(&self) -> &str;

    /// Whether this source talks to a live service
    fn is_live(&self) -> bool {
        false
    }

    /// Fetch zero or more raw records for a query, in source order
    async fn lookup(&self, query: &SearchQuery) -> Result<Vec<RawBreachRecord>, LookupError>;
}
