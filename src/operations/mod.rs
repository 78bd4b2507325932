mod dedup;
mod place;
mod plan;
mod report;

pub use dedup::DeduplicateCrossings;
pub use place::PlaceOpenings;
pub use plan::{plan_placements, Plan, PlanPlacements};
pub use report::{CategoryReport, PlacementReport};
