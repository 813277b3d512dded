//! HTTP client for talking to breach lookup services

use crate::config::OutgoingSettings;
use crate::error::{ConfigError, LookupError};
use crate::sources::{SourceRequest, SourceResponse};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Used when `outgoing.request_timeout` is not a positive number of seconds
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client wrapper configured from `outgoing` settings
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, ConfigError> {
        let timeout = request_timeout(settings.request_timeout);
        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            timeout,
            user_agent: format!("breachwatch/{}", crate::VERSION),
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Execute a source request
    pub async fn execute(&self, request: SourceRequest) -> Result<SourceResponse, LookupError> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(self.timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        for (key, value) in self.extra_headers.iter().chain(request.headers.iter()) {
            req_builder = req_builder.header(key, value);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<SourceResponse, LookupError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(SourceResponse { status, text, url })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn request_timeout(seconds: f64) -> Duration {
    match Duration::try_from_secs_f64(seconds) {
        Ok(timeout) if !timeout.is_zero() => timeout,
        _ => {
            warn!(
                "Ignoring invalid request timeout {}s, using {}s",
                seconds,
                DEFAULT_REQUEST_TIMEOUT.as_secs()
            );
            DEFAULT_REQUEST_TIMEOUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_timeout_falls_back_to_default() {
        for seconds in [-1.0, 0.0, f64::NAN, f64::INFINITY, 1e300] {
            let settings = OutgoingSettings {
                request_timeout: seconds,
                ..Default::default()
            };
            let client = HttpClient::with_settings(&settings).unwrap();
            assert_eq!(client.timeout, DEFAULT_REQUEST_TIMEOUT, "timeout {}", seconds);
        }

        let settings = OutgoingSettings {
            request_timeout: 2.5,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert_eq!(client.timeout, Duration::from_millis(2500));
    }

    #[tokio::test]
    async fn test_get_sends_json_accept_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client
            .execute(SourceRequest::get(format!("{}/ping", server.uri())))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.text, "pong");
        assert!(client.user_agent().starts_with("breachwatch/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = HttpClient::new().unwrap();
        let err = client
            .execute(SourceRequest::get("http://127.0.0.1:9/unreachable"))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }
}
