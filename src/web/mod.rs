//! Web server module
//!
//! JSON API over the search controller. Every response body is a pure
//! function of the current `SearchState`.

mod handlers;
mod routes;
mod state;

pub use handlers::{BreachView, StateView};
pub use routes::create_router;
pub use state::AppState;
