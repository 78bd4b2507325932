use crate::math::Point3;

use super::conduit::ConduitCategory;

/// Instruction to create one sized opening in one wall.
///
/// Width and height are both the diameter of the generating conduit.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<K, L> {
    /// Conduit that crosses the wall.
    pub conduit: K,
    pub category: ConduitCategory,
    /// Wall that receives the opening.
    pub obstacle: K,
    /// Linked model context of the wall, if any.
    pub link: Option<K>,
    /// Insertion point on the conduit centerline.
    pub point: Point3,
    /// Level hosting the wall.
    pub level: L,
    pub width: f64,
    pub height: f64,
}
