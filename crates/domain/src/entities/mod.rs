//! Domain entities - Objects with identity and lifecycle

mod forecast;
mod location;

pub use forecast::{Forecast, ForecastSample};
pub use location::{Location, NewLocation};
