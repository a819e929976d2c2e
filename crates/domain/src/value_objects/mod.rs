//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location_id;
mod metric;
mod top_n;

pub use geo_location::GeoLocation;
pub use location_id::LocationId;
pub use metric::{Metric, MetricCatalog};
pub use top_n::TopN;
