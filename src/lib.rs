//! Breachwatch: check whether an email address or domain appears in a known
//! data breach.
//!
//! A [`SearchController`] runs one search at a time against a configured
//! [`LookupSource`] (the remote dark-web-monitoring service, or a fixed
//! sample set when none is configured) and exposes the lifecycle of the
//! latest search as a [`SearchState`].

pub mod breach;
pub mod config;
pub mod error;
pub mod network;
pub mod query;
pub mod search;
pub mod sources;
pub mod web;

pub use breach::{BreachResult, BreachStatus, RawBreachRecord};
pub use config::Settings;
pub use error::{ConfigError, LookupError, ValidationError};
pub use query::{QueryInput, SearchMode, SearchQuery};
pub use search::{FailureReason, SearchController, SearchState};
pub use sources::LookupSource;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
