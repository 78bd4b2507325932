//! Boundary to the modeling host.
//!
//! The engine never touches a CAD document directly. Everything it needs from
//! the host (conduits, walls, ray queries, levels, opening creation and units
//! of work) goes through [`ObstacleQuery`] and [`OpeningHost`].

mod oracle;
pub mod scene;

pub use oracle::IntersectionOracle;

use std::fmt;
use std::hash::Hash;

use crate::error::HostError;
use crate::math::{Point3, Vector3};
use crate::model::{ConduitCategory, ConduitRecord, CrossingKey, Placement, RawHit};

/// Read-only queries against the host's current set of walls.
pub trait ObstacleQuery {
    /// Element identity for conduits, walls and linked models.
    type Key: Copy + Eq + Hash + fmt::Debug;
    /// Level an opening is hosted on.
    type Level: Clone + fmt::Debug;
    /// View or other spatial context ray queries run in.
    type Context;

    /// Casts an unbounded ray and reports every wall face it passes through.
    ///
    /// Hits may come back in any order and may include several hits on the
    /// same wall.
    fn find_obstacle_crossings(
        &self,
        context: &Self::Context,
        origin: &Point3,
        direction: &Vector3,
    ) -> Vec<RawHit<Self::Key>>;

    /// Returns the level hosting the wall, or `None` if it cannot be resolved.
    fn resolve_hosting_elevation(&self, obstacle: &CrossingKey<Self::Key>) -> Option<Self::Level>;
}

/// Names of the template parameters that receive the opening size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeParameters<'a> {
    pub width: &'a str,
    pub height: &'a str,
}

/// Full host surface needed to run a placement pass.
pub trait OpeningHost: ObstacleQuery {
    /// Model the conduits are read from.
    type Source;
    /// Loadable opening type.
    type Template;
    /// Handle to a created opening.
    type Opening;

    /// Locates the model that holds the conduits.
    fn conduit_source(&self) -> Option<Self::Source>;

    /// Lists all conduits of one category in the source model.
    fn list_linear_conduits(
        &self,
        source: &Self::Source,
        category: ConduitCategory,
    ) -> Vec<ConduitRecord<Self::Key>>;

    /// Returns a 3D context usable for ray queries.
    fn active_spatial_context(&self) -> Option<Self::Context>;

    /// Looks up the opening template by family name.
    fn opening_template(&self, family: &str) -> Option<Self::Template>;

    fn is_template_active(&self, template: &Self::Template) -> bool;

    /// Makes the template available for instantiation.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot activate the template.
    fn activate_template(&mut self, template: &Self::Template) -> Result<(), HostError>;

    /// Creates one opening and writes its size parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot place the opening or a size
    /// parameter is missing on the template.
    fn materialize_opening(
        &mut self,
        template: &Self::Template,
        placement: &Placement<Self::Key, Self::Level>,
        size: SizeParameters<'_>,
    ) -> Result<Self::Opening, HostError>;

    /// Starts a named unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if a unit is already open.
    fn begin_unit(&mut self, label: &str) -> Result<(), HostError>;

    /// Applies the open unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if no unit is open.
    fn commit_unit(&mut self) -> Result<(), HostError>;

    /// Discards everything done in the open unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if no unit is open.
    fn rollback_unit(&mut self) -> Result<(), HostError>;
}
