//! 2D vector definitions for profiles and footprints.
//!
//! Provides the `glam::DVec2` alias and the few planar helpers the
//! factories share.

pub use glam::DVec2 as V2;

/// Creates a UV point.
///
/// # Examples
/// ```
/// use lamp_mesh::core::vec2::{uv, V2};
///
/// assert_eq!(uv(0.25, 1.0), V2::new(0.25, 1.0));
/// ```
#[inline]
pub fn uv(u: f64, v: f64) -> V2 {
    V2::new(u, v)
}

/// Point on a circle of `radius` around `center` at `angle` radians.
pub fn polar(center: V2, radius: f64, angle: f64) -> V2 {
    center + V2::new(angle.cos(), angle.sin()) * radius
}

/// Rotates `point` about the origin by `angle` radians.
///
/// # Examples
/// ```
/// use lamp_mesh::core::vec2::{rotate, V2};
///
/// let p = rotate(V2::X, std::f64::consts::FRAC_PI_2);
/// assert!((p - V2::Y).length() < 1e-12);
/// ```
pub fn rotate(point: V2, angle: f64) -> V2 {
    V2::from_angle(angle).rotate(point)
}

/// Linear interpolation between two points.
#[inline]
pub fn lerp(a: V2, b: V2, t: f64) -> V2 {
    a + (b - a) * t
}
