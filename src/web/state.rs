//! Application state shared across handlers

use crate::config::Settings;
use crate::search::SearchController;
use crate::sources::LookupSource;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Owner of the search lifecycle
    pub controller: SearchController,
}

impl AppState {
    /// Create new application state around the configured source
    pub fn new(settings: Settings, source: Arc<dyn LookupSource>) -> Self {
        let controller =
            SearchController::new(source).with_timeout_secs(settings.source.lookup_timeout);

        Self {
            settings: Arc::new(settings),
            controller,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
