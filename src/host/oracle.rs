use crate::math::{Point3, Vector3};
use crate::model::RawHit;

use super::ObstacleQuery;

/// Ray queries bound to one spatial context of a host.
///
/// The host's hits are passed through in the order received; only hits with
/// a non-finite or negative distance are dropped.
pub struct IntersectionOracle<'a, H: ObstacleQuery> {
    host: &'a H,
    context: &'a H::Context,
}

impl<'a, H: ObstacleQuery> IntersectionOracle<'a, H> {
    /// Creates an oracle over `host` using `context` for all queries.
    #[must_use]
    pub fn new(host: &'a H, context: &'a H::Context) -> Self {
        Self { host, context }
    }

    /// Returns the underlying host.
    #[must_use]
    pub fn host(&self) -> &'a H {
        self.host
    }

    /// Casts a ray from `origin` along the unit `direction`.
    #[must_use]
    pub fn query(&self, origin: &Point3, direction: &Vector3) -> Vec<RawHit<H::Key>> {
        let mut hits = self
            .host
            .find_obstacle_crossings(self.context, origin, direction);
        let before = hits.len();
        hits.retain(|hit| hit.distance.is_finite() && hit.distance >= 0.0);
        if hits.len() != before {
            tracing::debug!(
                dropped = before - hits.len(),
                "discarded oracle hits with invalid distance"
            );
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrossingKey;

    struct FixedHits {
        hits: Vec<RawHit<u32>>,
    }

    impl ObstacleQuery for FixedHits {
        type Key = u32;
        type Level = &'static str;
        type Context = ();

        fn find_obstacle_crossings(
            &self,
            _context: &(),
            _origin: &Point3,
            _direction: &Vector3,
        ) -> Vec<RawHit<u32>> {
            self.hits.clone()
        }

        fn resolve_hosting_elevation(&self, _obstacle: &CrossingKey<u32>) -> Option<&'static str> {
            Some("Level 1")
        }
    }

    #[test]
    fn keeps_order_and_drops_invalid() {
        let host = FixedHits {
            hits: vec![
                RawHit::new(3.0, 1, Point3::new(3.0, 0.0, 0.0)),
                RawHit::new(-0.5, 2, Point3::new(-0.5, 0.0, 0.0)),
                RawHit::new(f64::NAN, 3, Point3::origin()),
                RawHit::new(1.0, 4, Point3::new(1.0, 0.0, 0.0)),
                RawHit::new(0.0, 5, Point3::origin()),
            ],
        };
        let oracle = IntersectionOracle::new(&host, &());
        let ids: Vec<u32> = oracle
            .query(&Point3::origin(), &Vector3::x())
            .iter()
            .map(|h| h.obstacle)
            .collect();
        assert_eq!(ids, vec![1, 4, 5]);
    }

    #[test]
    fn empty_oracle() {
        let host = FixedHits { hits: vec![] };
        let oracle = IntersectionOracle::new(&host, &());
        assert!(oracle.query(&Point3::origin(), &Vector3::x()).is_empty());
    }
}
