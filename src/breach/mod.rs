//! Breach record model
//!
//! Raw records as sources return them, the normalized display model, and the
//! sanitizer applied to descriptions before rendering.

mod normalize;
mod sanitize;
mod types;

pub use normalize::{group_thousands, select_first, NOT_AVAILABLE};
pub use sanitize::{escape_html, sanitize_description};
pub use types::*;
