//! Application layer - Use cases and orchestration
//!
//! Defines the ports the forecast service needs from storage and from the
//! weather provider, and the services that drive ingestion and the
//! aggregate queries through them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
