use std::fmt;
use std::hash::Hash;

use crate::error::{PreconditionError, Result};
use crate::host::{IntersectionOracle, ObstacleQuery, OpeningHost};
use crate::math::point_at;
use crate::model::{ConduitSegment, Placement};

use super::dedup::DeduplicateCrossings;

/// Result of planning one batch of conduits.
#[derive(Debug, Clone)]
pub struct Plan<K, L> {
    /// Openings to create, grouped by conduit in input order.
    pub placements: Vec<Placement<K, L>>,
    /// Unique crossings found, including those that were skipped.
    pub crossings: usize,
    /// Crossings dropped because the wall's level could not be resolved.
    pub skipped_crossings: usize,
}

/// Computes the openings needed for a batch of straight conduits.
///
/// Each conduit is cast as a ray from its start point, the hits are cut to
/// the conduit length and deduplicated per wall, and every surviving
/// crossing becomes one [`Placement`] sized by the conduit diameter.
pub struct PlanPlacements<'a, K> {
    conduits: &'a [ConduitSegment<K>],
}

impl<'a, K> PlanPlacements<'a, K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Creates a planner over `conduits`.
    #[must_use]
    pub fn new(conduits: &'a [ConduitSegment<K>]) -> Self {
        Self { conduits }
    }

    /// Executes the plan against the walls visible to `oracle`.
    ///
    /// Crossings whose hosting level cannot be resolved are skipped with a
    /// warning; they never fail the batch.
    #[must_use]
    pub fn execute<H>(&self, oracle: &IntersectionOracle<'_, H>) -> Plan<K, H::Level>
    where
        H: ObstacleQuery<Key = K>,
    {
        let mut plan = Plan {
            placements: Vec::new(),
            crossings: 0,
            skipped_crossings: 0,
        };

        for conduit in self.conduits {
            let origin = conduit.start();
            let direction = conduit.direction();

            let hits = oracle.query(origin, direction);
            let hit_count = hits.len();
            let crossings = DeduplicateCrossings::new(conduit.length()).execute(hits);
            tracing::debug!(
                conduit = ?conduit.id(),
                hits = hit_count,
                crossings = crossings.len(),
                "queried conduit"
            );
            plan.crossings += crossings.len();

            for crossing in crossings {
                let Some(level) = oracle.host().resolve_hosting_elevation(&crossing.key()) else {
                    tracing::warn!(
                        conduit = ?conduit.id(),
                        obstacle = ?crossing.obstacle,
                        "hosting level of wall not found, crossing skipped"
                    );
                    plan.skipped_crossings += 1;
                    continue;
                };

                plan.placements.push(Placement {
                    conduit: conduit.id(),
                    category: conduit.category(),
                    obstacle: crossing.obstacle,
                    link: crossing.link,
                    point: point_at(origin, direction, crossing.distance),
                    level,
                    width: conduit.diameter(),
                    height: conduit.diameter(),
                });
            }
        }

        plan
    }
}

/// Plans placements for `conduits` using the host's active 3D context.
///
/// Nothing is created; the host is only queried.
///
/// # Errors
///
/// Returns [`PreconditionError::MissingOpeningTemplate`] if the host has no
/// template of `template_family`, or
/// [`PreconditionError::MissingSpatialContext`] if it has no context to run
/// ray queries in.
pub fn plan_placements<H>(
    host: &H,
    template_family: &str,
    conduits: &[ConduitSegment<H::Key>],
) -> Result<Vec<Placement<H::Key, H::Level>>>
where
    H: OpeningHost,
{
    if host.opening_template(template_family).is_none() {
        return Err(PreconditionError::MissingOpeningTemplate(template_family.to_owned()).into());
    }
    let context = host
        .active_spatial_context()
        .ok_or(PreconditionError::MissingSpatialContext)?;
    let oracle = IntersectionOracle::new(host, &context);
    Ok(PlanPlacements::new(conduits).execute(&oracle).placements)
}
