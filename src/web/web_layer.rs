// Web layer - axum routes over the suggestion board.

#[path = "api_error.rs"]
pub mod api_error;

#[path = "identity.rs"]
pub mod identity;

#[path = "routes.rs"]
pub mod routes;

pub use routes::{router, AppState};
