//! Weather API HTTP presentation layer
//!
//! Read-only JSON routes over the aggregate forecast queries.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{ValidatedPath, ValidationError};
pub use routes::create_router;
pub use state::AppState;
