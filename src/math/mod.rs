pub mod ray_box;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance used when checking that a direction is unit length.
pub const UNIT_TOLERANCE: f64 = 1e-9;

/// Evaluates `origin + direction * distance`.
///
/// `direction` must already be unit length for `distance` to be a true
/// distance. Non-finite inputs propagate into the result.
#[must_use]
pub fn point_at(origin: &Point3, direction: &Vector3, distance: f64) -> Point3 {
    origin + direction * distance
}

/// Returns whether `v` has unit length within [`UNIT_TOLERANCE`].
#[must_use]
pub fn is_unit(v: &Vector3) -> bool {
    (v.norm() - 1.0).abs() <= UNIT_TOLERANCE
}
