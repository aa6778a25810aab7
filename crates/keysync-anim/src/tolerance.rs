//! Fixed tolerances shared by diagnostics and repair.

/// Equality tolerance for keyframe times and values.
pub const EPSILON: f64 = 0.000001;

/// Largest value delta allowed between consecutive rotation keys.
///
/// Rotation channels store tenths of degrees, so 9.0 is 90 degrees.
pub const SAFE_ROTATION_DELTA: f64 = 9.000001;

/// Spacing of the boundary values inserted when an overflowing rotation
/// segment is subdivided.
pub const ROTATION_BOUNDARY_STEP: f64 = 9.0;

/// Returns true if `b` lies within [`EPSILON`] of `a`.
pub fn fp_equal(a: f64, b: f64) -> bool {
    b >= a - EPSILON && b <= a + EPSILON
}
