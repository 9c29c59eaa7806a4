//! # Extrusion Profiles
//!
//! Normalized cross-section curves for voxel walls and the bilinear maps
//! that place them in space.
//!
//! ## UV Space
//!
//! ```text
//!  v
//!  1 ┤   ╭────────● (1,1) top end
//!    │  ╱
//!    │ ● (0, 1−r) top start
//!    │ │
//!  0 ┤ ●────────● (1,0) bottom start
//!    └─┴────────┴─ u
//!      0        1
//!   outer      centerline
//! ```
//!
//! [`get_uv_pair`] returns the floor (bottom-right to bottom-left) and the
//! vault (top-left to top-right). Their concatenation is the full wall
//! section from the floor center, out, up and back to the ceiling center.

mod arcs;


use std::ops::{Add, Mul};

use config::constants::DEFAULT_PROFILE_DIVISIONS;

use crate::core::vec2::uv;
use crate::core::{V2, V3};

pub use arcs::{unit_arc, unit_gothic};

/// Cross-section family of a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtrusionProfile {
    /// Straight wall and flat ceiling
    Square,
    /// Quarter circle of `radius_top`
    ///
    /// Always the round curve; a chamfered outline comes from
    /// [`ExtrusionProfile::Nested`] with a near-zero `division_pointedness`.
    Arc {
        /// Vault radius as a fraction of the voxel
        radius_top: f64,
    },
    /// Quarter ellipse reaching the centerline, always round
    Ellipse {
        /// Vertical radius
        radius_top: f64,
    },
    /// Pointed arch reaching the centerline
    Gothic {
        /// Vertical radius
        radius_top: f64,
        /// 0 round, 1 sharp
        pointedness: f64,
    },
    /// Arc outline scalloped into smaller arcs
    Nested {
        /// Radius of the outline arc
        radius_top: f64,
        /// Number of scallops
        division_count: u32,
        /// Samples per scallop
        division_resolution: u32,
        /// Scallop pointedness, below the chamfer threshold each scallop is its chord
        division_pointedness: f64,
    },
}

impl Default for ExtrusionProfile {
    fn default() -> Self {
        ExtrusionProfile::Arc { radius_top: 0.5 }
    }
}

/// Profile plus the insets applied when it is placed in a voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionParameters {
    /// Cross-section family
    pub profile: ExtrusionProfile,
    /// Ceiling inset, fraction of the column height
    pub inset_top: f64,
    /// Floor inset, fraction of the column height
    pub inset_bottom: f64,
    /// Wall inset, fraction of the distance to the centerline
    pub inset_sides: f64,
    /// Samples along each arc
    pub divisions: u32,
}

impl Default for ExtrusionParameters {
    fn default() -> Self {
        Self {
            profile: ExtrusionProfile::default(),
            inset_top: 0.1,
            inset_bottom: 0.1,
            inset_sides: 0.1,
            divisions: DEFAULT_PROFILE_DIVISIONS,
        }
    }
}

/// Floor and vault curves of a profile.
///
/// # Examples
/// ```
/// use lamp_mesh::profile::{get_uv_pair, ExtrusionProfile};
///
/// let (bottom, top) = get_uv_pair(&ExtrusionProfile::Square, 8);
/// assert_eq!(bottom.len(), 2);
/// assert_eq!(top.last().map(|p| p.y), Some(1.0));
/// ```
pub fn get_uv_pair(profile: &ExtrusionProfile, divisions: u32) -> (Vec<V2>, Vec<V2>) {
    let bottom = vec![uv(1.0, 0.0), uv(0.0, 0.0)];
    let top = match *profile {
        ExtrusionProfile::Square => vec![uv(0.0, 1.0), uv(1.0, 1.0)],
        ExtrusionProfile::Arc { radius_top } => arc_top(radius_top, divisions),
        ExtrusionProfile::Ellipse { radius_top } => {
            stretched(&unit_arc(divisions, 1.0), radius_top)
        }
        ExtrusionProfile::Gothic {
            radius_top,
            pointedness,
        } => stretched(&unit_gothic(divisions, pointedness), radius_top),
        ExtrusionProfile::Nested {
            radius_top,
            division_count,
            division_resolution,
            division_pointedness,
        } => nested_top(radius_top, division_count, division_resolution, division_pointedness),
    };
    (bottom, dedup(top))
}

/// The full wall section, floor then vault.
pub fn profile_curve(profile: &ExtrusionProfile, divisions: u32) -> Vec<V2> {
    let (mut curve, top) = get_uv_pair(profile, divisions);
    curve.extend(top);
    curve
}

fn clamp_radius(radius: f64) -> f64 {
    radius.clamp(0.0, 1.0)
}

fn arc_top(radius: f64, divisions: u32) -> Vec<V2> {
    let r = clamp_radius(radius);
    let mut top: Vec<V2> = unit_arc(divisions, 1.0)
        .into_iter()
        .map(|p| uv(p.x * r, 1.0 - r + p.y * r))
        .collect();
    top.push(uv(1.0, 1.0));
    top
}

/// Unit curve scaled to full width and height `radius`, ending at (1,1).
fn stretched(unit: &[V2], radius: f64) -> Vec<V2> {
    let r = clamp_radius(radius);
    unit.iter().map(|p| uv(p.x, 1.0 - r + p.y * r)).collect()
}

fn nested_top(radius: f64, count: u32, resolution: u32, pointedness: f64) -> Vec<V2> {
    let outline = arc_top(radius, count.max(1));
    // The last outline point is the flat run to the centerline
    let arc_end = outline.len().saturating_sub(1);
    let scallop = unit_arc(resolution, pointedness);

    let mut top = Vec::new();
    for pair in outline[..arc_end].windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let quad = [a, uv(b.x, a.y), uv(a.x, b.y), b];
        let mapped = map_uvs_to_quad(&scallop, &quad);
        let skip = usize::from(!top.is_empty());
        top.extend(mapped.into_iter().skip(skip));
    }
    if top.is_empty() {
        top.extend_from_slice(&outline[..arc_end]);
    }
    top.push(uv(1.0, 1.0));
    top
}

fn dedup(points: Vec<V2>) -> Vec<V2> {
    let mut result: Vec<V2> = Vec::with_capacity(points.len());
    for p in points {
        if result.last().map_or(true, |last| last.distance(p) > 1e-12) {
            result.push(p);
        }
    }
    result
}

// =============================================================================
// BILINEAR MAPPING
// =============================================================================

/// Bilinear interpolation inside `[v00, v01, v10, v11]`.
///
/// `u` runs from `v00` to `v01`, `v` from `v00` to `v10`:
/// `v00(1−u)(1−v) + v01·u(1−v) + v10(1−u)v + v11·uv`.
pub fn bilinear<T>(quad: &[T; 4], point: V2) -> T
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    let (u, v) = (point.x, point.y);
    quad[0] * ((1.0 - u) * (1.0 - v)) + quad[1] * (u * (1.0 - v)) + quad[2] * ((1.0 - u) * v) + quad[3] * (u * v)
}

/// Maps UV points into a planar quad.
pub fn map_uvs_to_quad(uvs: &[V2], quad: &[V2; 4]) -> Vec<V2> {
    uvs.iter().map(|p| bilinear(quad, *p)).collect()
}

/// Maps UV points onto a spatial quad, `[outer bottom, center bottom,
/// outer top, center top]`.
pub fn curve_for_quad(uvs: &[V2], quad: &[V3; 4]) -> Vec<V3> {
    uvs.iter().map(|p| bilinear(quad, *p)).collect()
}
