//! HTTP request handlers

pub mod forecasts;
pub mod health;
pub mod locations;
