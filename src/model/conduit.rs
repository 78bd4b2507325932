use std::fmt;

use crate::error::GeometryError;
use crate::math::{is_unit, point_at, Point3, Vector3, TOLERANCE};

/// Kind of linear conduit, processed one category per unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConduitCategory {
    /// Air duct.
    Duct,
    /// Pipe.
    Pipe,
}

impl ConduitCategory {
    /// Plural name used in unit-of-work labels and diagnostics.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Duct => "ducts",
            Self::Pipe => "pipes",
        }
    }
}

impl fmt::Display for ConduitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duct => f.write_str("duct"),
            Self::Pipe => f.write_str("pipe"),
        }
    }
}

/// Centerline of a conduit as the host reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConduitPath {
    /// Straight segment between two points.
    Line { start: Point3, end: Point3 },
    /// Circular arc through three points.
    Arc { start: Point3, mid: Point3, end: Point3 },
    /// Free-form spline.
    Spline { control_points: Vec<Point3> },
}

impl ConduitPath {
    /// Short name of the path kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Arc { .. } => "arc",
            Self::Spline { .. } => "spline",
        }
    }
}

/// A conduit as listed by the host, before shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitRecord<K> {
    /// Host identity of the conduit.
    pub id: K,
    /// Duct or pipe.
    pub category: ConduitCategory,
    /// Centerline geometry.
    pub path: ConduitPath,
    /// Nominal diameter, used as opening size.
    pub diameter: f64,
}

/// A straight conduit ready for crossing detection.
///
/// The direction is unit length, so distances along it are true distances.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitSegment<K> {
    id: K,
    category: ConduitCategory,
    start: Point3,
    direction: Vector3,
    length: f64,
    diameter: f64,
}

impl<K: Copy> ConduitSegment<K> {
    /// Creates a segment from a start point, a unit direction and a length.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` is not unit length, `length` is
    /// negative or non-finite, or `diameter` is not positive and finite.
    pub fn new(
        id: K,
        category: ConduitCategory,
        start: Point3,
        direction: Vector3,
        length: f64,
        diameter: f64,
    ) -> Result<Self, GeometryError> {
        if !is_unit(&direction) {
            return Err(GeometryError::NonUnitDirection(direction.norm()));
        }
        if !length.is_finite() || length < 0.0 {
            return Err(GeometryError::InvalidLength(length));
        }
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(GeometryError::InvalidDiameter(diameter));
        }
        Ok(Self {
            id,
            category,
            start,
            direction,
            length,
            diameter,
        })
    }

    /// Creates a segment running from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the endpoints coincide, or any
    /// error of [`ConduitSegment::new`].
    pub fn from_endpoints(
        id: K,
        category: ConduitCategory,
        start: Point3,
        end: Point3,
        diameter: f64,
    ) -> Result<Self, GeometryError> {
        let delta = end - start;
        let length = delta.norm();
        if length < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        Self::new(id, category, start, delta / length, length, diameter)
    }

    /// Builds a segment from a host record.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedShape`] for anything but a straight
    /// line, or any error of [`ConduitSegment::from_endpoints`].
    pub fn from_record(record: &ConduitRecord<K>) -> Result<Self, GeometryError> {
        match &record.path {
            ConduitPath::Line { start, end } => {
                Self::from_endpoints(record.id, record.category, *start, *end, record.diameter)
            }
            other => Err(GeometryError::UnsupportedShape(other.kind().to_owned())),
        }
    }

    #[must_use]
    pub fn id(&self) -> K {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> ConduitCategory {
        self.category
    }

    /// Start point of the centerline, used as ray origin.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Unit direction of the centerline.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// End point of the centerline.
    #[must_use]
    pub fn end(&self) -> Point3 {
        point_at(&self.start, &self.direction, self.length)
    }
}
