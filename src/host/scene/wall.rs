use crate::error::GeometryError;
use crate::math::ray_box::{ray_box_intersect, OrientedBox, RayBoxRelation};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::ElementId;

/// A straight wall modeled as a box standing on its baseline.
///
/// The baseline runs horizontally from `start` to `end` at the wall's base
/// height and is centered in the wall thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct WallData {
    start: Point3,
    end: Point3,
    thickness: f64,
    height: f64,
    /// Level the wall is hosted on.
    pub level: ElementId,
    /// Linked model the wall belongs to, if any.
    pub link: Option<ElementId>,
}

impl WallData {
    /// Creates a wall on `level`.
    ///
    /// The end point is projected onto the horizontal plane through `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the baseline has no horizontal extent or the
    /// thickness or height is not positive.
    pub fn new(
        start: Point3,
        end: Point3,
        thickness: f64,
        height: f64,
        level: ElementId,
    ) -> Result<Self, GeometryError> {
        let end = Point3::new(end.x, end.y, start.z);
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        if !(thickness > TOLERANCE && height > TOLERANCE) {
            return Err(GeometryError::Degenerate(format!(
                "wall thickness {thickness} and height {height} must be positive"
            )));
        }
        Ok(Self {
            start,
            end,
            thickness,
            height,
            level,
            link: None,
        })
    }

    /// Marks the wall as living in a linked model.
    #[must_use]
    pub fn in_link(mut self, link: ElementId) -> Self {
        self.link = Some(link);
        self
    }

    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Solid body of the wall.
    #[must_use]
    pub fn body(&self) -> OrientedBox {
        let delta = self.end - self.start;
        let length = delta.norm();
        let along = delta / length;
        let across = Vector3::z().cross(&along);
        OrientedBox {
            corner: self.start - across * (self.thickness / 2.0),
            axes: [along, across, Vector3::z()],
            extents: Vector3::new(length, self.thickness, self.height),
        }
    }

    /// Distances at which a ray crosses the wall's faces.
    ///
    /// Entry and exit faces are reported separately, entry first; faces
    /// behind the origin are left out.
    #[must_use]
    pub fn face_hits(&self, origin: &Point3, direction: &Vector3) -> Vec<f64> {
        match ray_box_intersect(origin, direction, &self.body()) {
            RayBoxRelation::Miss => Vec::new(),
            RayBoxRelation::Span { t_enter, t_exit } => {
                let mut hits = Vec::with_capacity(2);
                if t_enter >= 0.0 {
                    hits.push(t_enter);
                }
                if t_exit >= 0.0 && t_exit - t_enter > TOLERANCE {
                    hits.push(t_exit);
                }
                hits
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn level() -> ElementId {
        ElementId::from(KeyData::from_ffi(1))
    }

    fn wall_along_y_at_x(x: f64) -> WallData {
        WallData::new(
            Point3::new(x, -5.0, 0.0),
            Point3::new(x, 5.0, 0.0),
            0.2,
            3.0,
            level(),
        )
        .unwrap()
    }

    #[test]
    fn ray_through_wall_hits_both_faces() {
        let wall = wall_along_y_at_x(2.0);
        let hits = wall.face_hits(&Point3::new(0.0, 0.0, 1.0), &Vector3::x());
        assert_eq!(hits.len(), 2);
        assert!((hits[0] - 1.9).abs() < 1e-9);
        assert!((hits[1] - 2.1).abs() < 1e-9);
    }

    #[test]
    fn ray_above_wall_misses() {
        let wall = wall_along_y_at_x(2.0);
        let hits = wall.face_hits(&Point3::new(0.0, 0.0, 3.5), &Vector3::x());
        assert!(hits.is_empty());
    }

    #[test]
    fn wall_behind_origin_is_ignored() {
        let wall = wall_along_y_at_x(-2.0);
        let hits = wall.face_hits(&Point3::new(0.0, 0.0, 1.0), &Vector3::x());
        assert!(hits.is_empty());
    }

    #[test]
    fn origin_inside_wall_reports_exit_only() {
        let wall = wall_along_y_at_x(0.0);
        let hits = wall.face_hits(&Point3::new(0.0, 0.0, 1.0), &Vector3::x());
        assert_eq!(hits.len(), 1);
        assert!((hits[0] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn end_is_flattened_to_base() {
        let wall = WallData::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(4.0, 0.0, 7.0),
            0.3,
            2.5,
            level(),
        )
        .unwrap();
        assert!((wall.end().z - 1.0).abs() < f64::EPSILON);
        assert!((wall.thickness() - 0.3).abs() < f64::EPSILON);
        assert!((wall.height() - 2.5).abs() < f64::EPSILON);
        let body = wall.body();
        assert!((body.extents - Vector3::new(4.0, 0.3, 2.5)).norm() < TOLERANCE);
    }

    #[test]
    fn vertical_baseline_rejected() {
        let err = WallData::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
            0.2,
            3.0,
            level(),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::ZeroVector);
    }

    #[test]
    fn zero_thickness_rejected() {
        let res = WallData::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            0.0,
            3.0,
            level(),
        );
        assert!(matches!(res, Err(GeometryError::Degenerate(_))));
    }
}
