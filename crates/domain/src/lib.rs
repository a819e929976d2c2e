//! Domain layer for the weather forecast service
//!
//! Contains the forecast and location entities, the metric catalog and the
//! value objects shared by ingestion and the query layer.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
