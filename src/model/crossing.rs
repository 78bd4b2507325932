use crate::math::Point3;

/// Composite identity used to decide whether two hits touch the same wall.
///
/// Equality is by referenced element, never by geometric proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrossingKey<K> {
    /// Obstacle element.
    pub obstacle: K,
    /// Linked model the obstacle lives in, if any.
    pub link: Option<K>,
}

/// One unprocessed ray hit reported by the intersection oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHit<K> {
    /// Distance from the ray origin along the unit direction.
    pub distance: f64,
    /// Obstacle that was hit.
    pub obstacle: K,
    /// Linked model context of the obstacle, if any.
    pub link: Option<K>,
    /// Hit point as reported by the oracle.
    pub point: Point3,
}

impl<K: Copy> RawHit<K> {
    /// Creates a hit on an obstacle of the host model itself.
    #[must_use]
    pub fn new(distance: f64, obstacle: K, point: Point3) -> Self {
        Self {
            distance,
            obstacle,
            link: None,
            point,
        }
    }

    /// Sets the linked model context.
    #[must_use]
    pub fn in_link(mut self, link: K) -> Self {
        self.link = Some(link);
        self
    }

    /// Returns the deduplication key of this hit.
    #[must_use]
    pub fn key(&self) -> CrossingKey<K> {
        CrossingKey {
            obstacle: self.obstacle,
            link: self.link,
        }
    }
}

/// A unique crossing between one conduit and one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<K> {
    pub obstacle: K,
    pub link: Option<K>,
    /// Distance of the representative hit along the conduit.
    pub distance: f64,
    /// Point of the representative hit.
    pub point: Point3,
}

impl<K: Copy> Crossing<K> {
    #[must_use]
    pub fn key(&self) -> CrossingKey<K> {
        CrossingKey {
            obstacle: self.obstacle,
            link: self.link,
        }
    }
}

impl<K> From<RawHit<K>> for Crossing<K> {
    fn from(hit: RawHit<K>) -> Self {
        Self {
            obstacle: hit.obstacle,
            link: hit.link,
            distance: hit.distance,
            point: hit.point,
        }
    }
}
