pub mod arc_2d;
pub mod intersect_2d;

use crate::error::GeometryError;

/// 2D point in lathe coordinates.
///
/// Component 0 (`.x`) is the radial X axis, component 1 (`.y`) the axial Z
/// axis. Construct with [`xz`] to keep call sites readable.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector in lathe coordinates, `(x, z)`.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Magnitude below which a vector cannot be normalized.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Builds a point from its radial and axial coordinates.
#[must_use]
pub fn xz(x: f64, z: f64) -> Point2 {
    Point2::new(x, z)
}

/// Normalizes `v`, failing instead of returning a zero vector.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `|v| < 1e-12`.
pub fn normalize(v: Vector2) -> Result<Vector2, GeometryError> {
    let len = v.norm();
    if len < NORMALIZE_EPSILON {
        return Err(GeometryError::ZeroVector);
    }
    Ok(v / len)
}

/// Rotates by +90°: `(x, z) → (−z, x)`.
#[must_use]
pub fn rotate_ccw(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rotates by −90°: `(x, z) → (z, −x)`.
#[must_use]
pub fn rotate_cw(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// 2D cross product `a.x * b.z − a.z * b.x`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    rotate_ccw(dir)
}
