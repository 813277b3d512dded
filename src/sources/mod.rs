//! Lookup sources
//!
//! Defines the LookupSource trait and its two variants: the remote breach
//! service and the offline fixture set.

mod loader;
mod traits;

pub mod fixture;
pub mod remote;

pub use fixture::FixtureBreachSet;
pub use loader::SourceLoader;
pub use remote::RemoteBreachService;
pub use traits::*;
