//! Lobed radial footprint.
//!
//! One shard is laid out around the positive x axis and copied around the
//! circle. A shard holds, from the inside out:
//!
//! ```text
//!            ╭──lobe──╮
//!           │  strips  │
//!   gusset ─┤──neck────├─ gusset
//!            ╲  core  ╱
//! ```
//!
//! - the neck, between one edge of the core polygon and the lobe chord,
//!   narrowed by `angle_split`
//! - the lobe, a strip of cells between the chord and a circular arc of
//!   `lobe_radius` through the chord ends
//! - a gusset triangle filling the gap to the next shard's neck
//!
//! Neighbouring cells share exact vertex positions so the half-edge builder
//! links them.

use std::f64::consts::{PI, TAU};

use config::constants::approx_zero;

use crate::core::vec2::{lerp, polar, rotate};
use crate::core::V2;
use crate::error::MeshResult;
use crate::mesh::Mesh;
use crate::voxel::VoxelState;

use super::{require, FootprintBuilder};

/// Shape controls of the lobed footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MalculmiusParameters {
    /// Number of lobes
    pub lobe_count: u32,
    /// Radius of the core polygon
    pub circle_radius: f64,
    /// Radius of each lobe arc
    pub lobe_radius: f64,
    /// Cells per half lobe
    pub lobe_divisions: u32,
    /// Radial distance between the core and the lobe chord
    pub offset: f64,
    /// Fraction of each sector taken by the neck, in `(0, 1)`
    pub angle_split: f64,
}

impl Default for MalculmiusParameters {
    fn default() -> Self {
        Self {
            lobe_count: 5,
            circle_radius: 30.0,
            lobe_radius: 20.0,
            lobe_divisions: 2,
            offset: 10.0,
            angle_split: 0.6,
        }
    }
}

struct Shard {
    cells: Vec<Vec<V2>>,
}

impl Shard {
    fn new(params: &MalculmiusParameters) -> Self {
        let half = PI / params.lobe_count as f64;
        let chord_radius = params.circle_radius + params.offset;
        let neck_half = half * params.angle_split;

        let core_a = polar(V2::ZERO, params.circle_radius, -half);
        let core_b = polar(V2::ZERO, params.circle_radius, half);
        let neck_a = polar(V2::ZERO, chord_radius, -neck_half);
        let neck_b = polar(V2::ZERO, chord_radius, neck_half);
        let next_neck_a = polar(V2::ZERO, chord_radius, 2.0 * half - neck_half);

        // Arc through both chord ends, bulging outward
        let steps = (2 * params.lobe_divisions) as usize;
        let chord_mid = lerp(neck_a, neck_b, 0.5);
        let half_chord = chord_mid.distance(neck_b);
        let arc_radius = params.lobe_radius.max(half_chord);
        let depth = (arc_radius * arc_radius - half_chord * half_chord).max(0.0).sqrt();
        let arc_center = chord_mid + V2::X * depth;
        let opening = half_chord.atan2(depth);
        let start = -(PI - opening);
        let sweep = TAU - 2.0 * opening;

        let chord: Vec<V2> = (0..=steps).map(|t| lerp(neck_a, neck_b, t as f64 / steps as f64)).collect();
        let arc: Vec<V2> = (0..=steps)
            .map(|t| {
                if t == 0 {
                    neck_a
                } else if t == steps {
                    neck_b
                } else {
                    polar(arc_center, arc_radius, start + sweep * t as f64 / steps as f64)
                }
            })
            .collect();

        let mut cells = Vec::with_capacity(steps + 2);

        let mut neck = Vec::with_capacity(steps + 3);
        neck.push(core_a);
        neck.extend_from_slice(&chord);
        neck.push(core_b);
        cells.push(neck);

        for t in 0..steps {
            cells.push(vec![chord[t], arc[t], arc[t + 1], chord[t + 1]]);
        }

        cells.push(vec![core_b, neck_b, next_neck_a]);

        Self { cells }
    }
}

pub(super) fn malculmius_one(params: &MalculmiusParameters) -> MeshResult<Mesh> {
    require(params.lobe_count >= 3, || {
        format!("lobed footprint needs at least 3 lobes, got {}", params.lobe_count)
    })?;
    require(params.lobe_divisions >= 1, || "lobe divisions must be at least 1".to_string())?;
    require(params.circle_radius >= 0.0 && params.offset >= 0.0, || {
        format!(
            "circle radius and offset must not be negative, got {} and {}",
            params.circle_radius, params.offset
        )
    })?;
    require(params.circle_radius + params.offset > 0.0, || {
        "circle radius and offset cannot both be zero".to_string()
    })?;
    require(params.lobe_radius > 0.0, || {
        format!("lobe radius must be positive, got {}", params.lobe_radius)
    })?;
    require(params.angle_split > 0.0 && params.angle_split < 1.0, || {
        format!("angle split must lie in (0, 1), got {}", params.angle_split)
    })?;

    let shard = Shard::new(params);
    let sector = TAU / params.lobe_count as f64;
    let mut builder = FootprintBuilder::new();

    if !approx_zero(params.circle_radius) {
        let core: Vec<V2> = (0..params.lobe_count)
            .map(|k| polar(V2::ZERO, params.circle_radius, (k as f64 - 0.5) * sector))
            .collect();
        builder.polygon(&core, Some(VoxelState::None))?;
    }

    for k in 0..params.lobe_count {
        let angle = k as f64 * sector;
        for cell in &shard.cells {
            let rotated: Vec<V2> = cell.iter().map(|p| rotate(*p, angle)).collect();
            builder.polygon(&rotated, None)?;
        }
    }
    Ok(builder.finish())
}
