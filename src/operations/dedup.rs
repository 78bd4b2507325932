use std::collections::HashSet;
use std::hash::Hash;

use crate::model::{Crossing, RawHit};

/// Collapses the raw hits of one conduit into unique crossings.
///
/// Hits farther than the conduit length are dropped (a hit at exactly the
/// length is kept). The remaining hits are grouped by [`CrossingKey`] and the
/// first hit of each group in input order is kept; hits are never re-sorted.
///
/// [`CrossingKey`]: crate::model::CrossingKey
#[derive(Debug, Clone, Copy)]
pub struct DeduplicateCrossings {
    length: f64,
}

impl DeduplicateCrossings {
    /// Creates a deduplicator for a conduit of the given length.
    #[must_use]
    pub fn new(length: f64) -> Self {
        Self { length }
    }

    /// Executes the deduplication, returning crossings in first-seen order.
    pub fn execute<K, I>(&self, hits: I) -> Vec<Crossing<K>>
    where
        K: Copy + Eq + Hash,
        I: IntoIterator<Item = RawHit<K>>,
    {
        let mut seen = HashSet::new();
        hits.into_iter()
            .filter(|hit| hit.distance <= self.length)
            .filter(|hit| seen.insert(hit.key()))
            .map(Crossing::from)
            .collect()
    }
}
