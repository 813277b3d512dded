//! Search orchestration module
//!
//! Runs lookups, normalizes what comes back, and tracks the lifecycle state
//! of the latest search.

mod controller;
mod state;

pub use controller::{SearchController, SearchTicket, Settled, DEFAULT_LOOKUP_TIMEOUT};
pub use state::*;
