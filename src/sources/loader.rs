//! Source selection from configuration

use super::fixture::FixtureBreachSet;
use super::remote::RemoteBreachService;
use super::traits::LookupSource;
use crate::config::{Settings, SourceKind};
use crate::error::ConfigError;
use crate::network::HttpClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Picks the single lookup source active for a deployment
pub struct SourceLoader;

impl SourceLoader {
    /// Build the configured source.
    ///
    /// `auto` prefers the remote service and falls back to the fixture set
    /// when no base URL is configured.
    pub fn load(settings: &Settings) -> Result<Arc<dyn LookupSource>, ConfigError> {
        let source = &settings.source;
        let base_url = source
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        let use_remote = match (source.kind, base_url) {
            (SourceKind::Fixture, _) => false,
            (SourceKind::Remote, None) => return Err(ConfigError::MissingBaseUrl),
            (SourceKind::Remote, Some(_)) | (SourceKind::Auto, Some(_)) => true,
            (SourceKind::Auto, None) => false,
        };

        match base_url.filter(|_| use_remote) {
            Some(url) => {
                if source.endpoints.modes_share_endpoint() {
                    warn!(
                        "Email and domain searches share one endpoint ({}); configure source.endpoints.email for a dedicated email lookup",
                        source.endpoints.email
                    );
                }

                let client = HttpClient::with_settings(&settings.outgoing)?;
                let remote = RemoteBreachService::new(client, url, source.endpoints.clone())?;
                info!("Using remote breach service at {}", url);
                Ok(Arc::new(remote))
            }
            None => {
                let fixture = match source.fixture_seed {
                    Some(seed) => FixtureBreachSet::with_seed(seed),
                    None => FixtureBreachSet::new(),
                }
                .with_hit_rate(source.fixture_hit_rate);

                info!(
                    "No live breach service configured, answering from fixture set (hit rate {:.0}%)",
                    fixture.hit_rate() * 100.0
                );
                Ok(Arc::new(fixture))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_without_base_url_uses_fixture() {
        let source = SourceLoader::load(&Settings::default()).unwrap();
        assert_eq!(source.name(), "fixture");
        assert!(!source.is_live());
    }

    #[test]
    fn test_auto_with_base_url_uses_remote() {
        let mut settings = Settings::default();
        settings.source.base_url = Some("http://localhost:7001".to_string());

        let source = SourceLoader::load(&settings).unwrap();
        assert_eq!(source.name(), "remote");
        assert!(source.is_live());
    }

    #[test]
    fn test_fixture_kind_ignores_base_url() {
        let mut settings = Settings::default();
        settings.source.kind = SourceKind::Fixture;
        settings.source.base_url = Some("http://localhost:7001".to_string());

        assert_eq!(SourceLoader::load(&settings).unwrap().name(), "fixture");
    }

    #[test]
    fn test_remote_requires_base_url() {
        let mut settings = Settings::default();
        settings.source.kind = SourceKind::Remote;
        settings.source.base_url = Some("   ".to_string());

        assert!(matches!(
            SourceLoader::load(&settings),
            Err(ConfigError::MissingBaseUrl)
        ));
    }
}
