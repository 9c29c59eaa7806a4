//! Thin wrapper around `glam::DVec3` plus the fixed-precision vertex key.
//!
//! Positions are compared through [`VertexKey`] whenever meshes are joined,
//! so vertices that agree to two decimals collapse into one.

use config::constants::key_coordinate;

pub use glam::DVec3 as V3;

/// Fixed-precision identity of a position.
///
/// # Examples
/// ```
/// use lamp_mesh::core::vec3::{VertexKey, V3};
///
/// let a = VertexKey::from(V3::new(1.0, 2.0, 3.0));
/// let b = VertexKey::from(V3::new(1.001, 1.999, 3.004));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey(pub i64, pub i64, pub i64);

impl From<V3> for VertexKey {
    fn from(p: V3) -> Self {
        VertexKey(key_coordinate(p.x), key_coordinate(p.y), key_coordinate(p.z))
    }
}

/// Average of a set of points. Returns the origin for an empty set.
pub fn centroid(points: &[V3]) -> V3 {
    if points.is_empty() {
        return V3::ZERO;
    }
    points.iter().copied().sum::<V3>() / points.len() as f64
}

/// Newell normal of a polygon, not normalized.
///
/// Robust for non-planar and concave loops; zero for degenerate ones.
pub fn polygon_normal(points: &[V3]) -> V3 {
    let mut normal = V3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Area of a planar polygon.
pub fn polygon_area(points: &[V3]) -> f64 {
    polygon_normal(points).length() * 0.5
}
