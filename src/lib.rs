pub mod config;
pub mod error;
pub mod host;
pub mod math;
pub mod model;
pub mod operations;

pub use config::{FailurePolicy, PlacementConfig};
pub use error::{OpeningsError, Result};
pub use operations::{plan_placements, PlaceOpenings};
