use super::{Point3, Vector3, TOLERANCE};

/// A box spanned by three orthonormal axes from a corner point.
///
/// A point `corner + a * axes[0] + b * axes[1] + c * axes[2]` is inside when
/// `0 <= a <= extents.x`, `0 <= b <= extents.y` and `0 <= c <= extents.z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Corner the axes start from.
    pub corner: Point3,
    /// Orthonormal frame of the box.
    pub axes: [Vector3; 3],
    /// Size of the box along each axis.
    pub extents: Vector3,
}

/// Relationship of a line with an [`OrientedBox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayBoxRelation {
    /// The line misses the box.
    Miss,
    /// The line is inside the box for `t_enter <= t <= t_exit`.
    Span { t_enter: f64, t_exit: f64 },
}

/// Intersects the line `origin + t * dir` with a box using the slab method.
///
/// The returned parameters cover the whole line, so either may be negative
/// when the origin lies inside or past the box.
#[must_use]
pub fn ray_box_intersect(origin: &Point3, dir: &Vector3, bx: &OrientedBox) -> RayBoxRelation {
    let rel = origin - bx.corner;
    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;

    for (axis, extent) in bx.axes.iter().zip(bx.extents.iter()) {
        let o = rel.dot(axis);
        let d = dir.dot(axis);

        if d.abs() < TOLERANCE {
            // Parallel to this slab: must already lie between its planes.
            if o < -TOLERANCE || o > extent + TOLERANCE {
                return RayBoxRelation::Miss;
            }
            continue;
        }

        let mut t1 = -o / d;
        let mut t2 = (extent - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_near = t_near.max(t1);
        t_far = t_far.min(t2);

        if t_near > t_far + TOLERANCE {
            return RayBoxRelation::Miss;
        }
    }

    if !t_near.is_finite() || !t_far.is_finite() {
        return RayBoxRelation::Miss;
    }

    RayBoxRelation::Span {
        t_enter: t_near,
        t_exit: t_far.max(t_near),
    }
}
