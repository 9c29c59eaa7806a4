//! Polar ring footprint.

use config::constants::{approx_zero, MIN_CYLINDER_SEGMENTS};

use crate::core::vec2::polar;
use crate::core::V2;
use crate::error::MeshResult;
use crate::mesh::Mesh;
use crate::voxel::VoxelState;

use super::{require, FootprintBuilder};

/// Segments and ring layout of a cylinder footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParameters {
    /// Cells per ring
    pub segments: u32,
    /// Number of rings
    pub rings: u32,
    /// Radius of the innermost ring; zero fills the core with a hollow polygon
    pub inner_radius: f64,
    /// Width of the first ring
    pub ring_width: f64,
    /// Width ratio between consecutive rings
    pub ring_growth: f64,
    /// Angular offset of the first segment, in degrees
    pub rotation: f64,
}

impl Default for CylinderParameters {
    fn default() -> Self {
        Self {
            segments: 8,
            rings: 1,
            inner_radius: 40.0,
            ring_width: 20.0,
            ring_growth: 1.0,
            rotation: 0.0,
        }
    }
}

impl CylinderParameters {
    /// Ring boundary radii, innermost first.
    ///
    /// With a zero inner radius the core polygon takes the first ring width
    /// and the rings start outside it.
    pub fn radii(&self) -> Vec<f64> {
        let mut radius = if approx_zero(self.inner_radius) {
            self.ring_width
        } else {
            self.inner_radius
        };
        let mut width = self.ring_width;
        let mut radii = Vec::with_capacity(self.rings as usize + 1);
        radii.push(radius);
        for _ in 0..self.rings {
            radius += width;
            width *= self.ring_growth;
            radii.push(radius);
        }
        radii
    }
}

pub(super) fn cylinder(params: &CylinderParameters) -> MeshResult<Mesh> {
    require(params.segments >= MIN_CYLINDER_SEGMENTS, || {
        format!(
            "cylinder needs at least {MIN_CYLINDER_SEGMENTS} segments, got {}",
            params.segments
        )
    })?;
    require(params.rings >= 1, || "cylinder needs at least one ring".to_string())?;
    require(params.inner_radius >= 0.0, || {
        format!("inner radius must not be negative, got {}", params.inner_radius)
    })?;
    require(params.ring_width > 0.0 && params.ring_growth > 0.0, || {
        format!(
            "ring width and growth must be positive, got {} and {}",
            params.ring_width, params.ring_growth
        )
    })?;

    let segments = params.segments as usize;
    let step = std::f64::consts::TAU / segments as f64;
    let offset = params.rotation.to_radians();
    let angle = |s: usize| offset + (s % segments) as f64 * step;
    let radii = params.radii();

    let mut builder = FootprintBuilder::new();
    if approx_zero(params.inner_radius) {
        let core: Vec<V2> = (0..segments).map(|s| polar(V2::ZERO, radii[0], angle(s))).collect();
        builder.polygon(&core, Some(VoxelState::None))?;
    }
    for ring in radii.windows(2) {
        let (inner, outer) = (ring[0], ring[1]);
        for s in 0..segments {
            builder.polygon(
                &[
                    polar(V2::ZERO, inner, angle(s)),
                    polar(V2::ZERO, outer, angle(s)),
                    polar(V2::ZERO, outer, angle(s + 1)),
                    polar(V2::ZERO, inner, angle(s + 1)),
                ],
                None,
            )?;
        }
    }
    Ok(builder.finish())
}
