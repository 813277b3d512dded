//! HTTP networking module
//!
//! Provides the HTTP client used by the remote breach service.

mod client;

pub use client::HttpClient;
