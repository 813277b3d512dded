//! Remote breach lookup service
//!
//! Talks to the dark-web-monitoring API. The response is a JSON object with
//! an optional `breaches` array; any other JSON shape counts as no records.

use super::traits::*;
use crate::breach::RawBreachRecord;
use crate::config::EndpointTable;
use crate::error::{ConfigError, LookupError};
use crate::network::HttpClient;
use crate::query::{SearchMode, SearchQuery};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

const QUERY_PLACEHOLDER: &str = "{query}";

/// Live breach service reached over HTTP
pub struct RemoteBreachService {
    client: HttpClient,
    base_url: String,
    endpoints: EndpointTable,
}

impl RemoteBreachService {
    pub fn new(
        client: HttpClient,
        base_url: &str,
        endpoints: EndpointTable,
    ) -> Result<Self, ConfigError> {
        Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        if !endpoints.email.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::EndpointTemplate { mode: "email" });
        }
        if !endpoints.domain.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::EndpointTemplate { mode: "domain" });
        }

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    /// Address a query in the given mode resolves to
    pub fn endpoint_url(&self, mode: SearchMode, text: &str) -> String {
        let template = match mode {
            SearchMode::Email => &self.endpoints.email,
            SearchMode::Domain => &self.endpoints.domain,
        };
        let path = template.replace(QUERY_PLACEHOLDER, &urlencoding::encode(text));

        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Build the HTTP request for a query
    pub fn request(&self, query: &SearchQuery) -> SourceRequest {
        SourceRequest::get(self.endpoint_url(query.mode, query.trimmed()))
    }

    /// Parse the HTTP response into raw records
    pub fn response(&self, response: SourceResponse) -> Result<Vec<RawBreachRecord>, LookupError> {
        if !response.is_success() {
            return Err(LookupError::Transport(format!(
                "HTTP {} from {}",
                response.status, response.url
            )));
        }

        let json: Value = serde_json::from_str(&response.text)?;

        let Some(items) = json.get("breaches").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match RawBreachRecord::from_value(item) {
                Some(record) => records.push(record),
                None => debug!("Skipping breach entry {}: not an object", index),
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl LookupSource for RemoteBreachService {
    fn name(&self) -> &str {
        "remote"
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn lookup(&self, query: &SearchQuery) -> Result<Vec<RawBreachRecord>, LookupError> {
        let request = self.request(query);
        debug!("Requesting {}", request.url);

        let response = self.client.execute(request).await?;
        let records = self.response(response)?;

        debug!("Remote service returned {} records", records.len());
        Ok(records)
    }
}
