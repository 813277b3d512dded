//! Settings structures for breachwatch configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default path template of the dark-web-monitoring domain lookup
pub const DOMAIN_ENDPOINT: &str = "/auth/api/v1/dark-web-monitoring/domain/{query}";

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub source: SourceSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (BREACHWATCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BREACHWATCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("BREACHWATCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BREACHWATCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("BREACHWATCH_BASE_URL") {
            self.source.base_url = if val.trim().is_empty() {
                None
            } else {
                Some(val)
            };
        }
        if let Some(val) = lookup("BREACHWATCH_SOURCE") {
            if let Ok(kind) = val.parse() {
                self.source.kind = kind;
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the API
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Dark Web Monitor".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8787,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Which lookup source answers queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Remote service if a base URL is configured, otherwise the fixture set
    #[default]
    Auto,
    Remote,
    Fixture,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SourceKind::Auto),
            "remote" => Ok(SourceKind::Remote),
            "fixture" => Ok(SourceKind::Fixture),
            other => Err(format!("unknown source kind: {}", other)),
        }
    }
}

/// Lookup source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Base URL of the remote breach service, e.g. `http://10.0.0.5:7001`
    pub base_url: Option<String>,
    /// Path templates per search mode
    pub endpoints: EndpointTable,
    /// Upper bound on a single lookup, in seconds
    pub lookup_timeout: f64,
    /// Probability that the fixture set returns a record
    pub fixture_hit_rate: f64,
    /// Fixed RNG seed for the fixture set
    pub fixture_seed: Option<u64>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Auto,
            base_url: None,
            endpoints: EndpointTable::default(),
            lookup_timeout: 15.0,
            fixture_hit_rate: 0.7,
            fixture_seed: None,
        }
    }
}

/// Path template per search mode; `{query}` is replaced by the encoded query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointTable {
    pub email: String,
    pub domain: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        // The deployed service only exposes the domain lookup; email searches
        // are routed there too until an email endpoint is configured.
        Self {
            email: DOMAIN_ENDPOINT.to_string(),
            domain: DOMAIN_ENDPOINT.to_string(),
        }
    }
}

impl EndpointTable {
    /// True when both modes resolve to the same address
    pub fn modes_share_endpoint(&self) -> bool {
        self.email == self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8787);
        assert!(!settings.general.debug);
        assert_eq!(settings.source.kind, SourceKind::Auto);
        assert!(settings.source.base_url.is_none());
        assert!(settings.source.endpoints.modes_share_endpoint());
    }

    #[test]
    fn test_partial_yaml() {
        let settings = Settings::from_yaml(
            r#"
source:
  kind: remote
  base_url: "http://localhost:7001"
  endpoints:
    email: "/auth/api/v1/dark-web-monitoring/email/{query}"
  lookup_timeout: 3
"#,
        )
        .unwrap();

        assert_eq!(settings.source.kind, SourceKind::Remote);
        assert_eq!(settings.source.base_url.as_deref(), Some("http://localhost:7001"));
        assert_eq!(settings.source.endpoints.domain, DOMAIN_ENDPOINT);
        assert!(!settings.source.endpoints.modes_share_endpoint());
        assert_eq!(settings.source.lookup_timeout, 3.0);
        assert_eq!(settings.source.fixture_hit_rate, 0.7);
        assert_eq!(settings.server.port, 8787);
    }

    #[test]
    fn test_merge_vars() {
        let mut settings = Settings::default();
        let vars: HashMap<&str, &str> = [
            ("BREACHWATCH_PORT", "9000"),
            ("BREACHWATCH_BASE_URL", "http://breach.internal"),
            ("BREACHWATCH_SOURCE", "Remote"),
            ("BREACHWATCH_DEBUG", "true"),
        ]
        .into_iter()
        .collect();

        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.port, 9000);
        assert!(settings.general.debug);
        assert_eq!(settings.source.kind, SourceKind::Remote);
        assert_eq!(
            settings.source.base_url.as_deref(),
            Some("http://breach.internal")
        );
    }
}
