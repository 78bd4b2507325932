pub mod conduit;
pub mod crossing;
pub mod placement;

pub use conduit::{ConduitCategory, ConduitPath, ConduitRecord, ConduitSegment};
pub use crossing::{Crossing, CrossingKey, RawHit};
pub use placement::Placement;
