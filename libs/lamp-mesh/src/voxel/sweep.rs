//! Footprint sweeps.
//!
//! Vertex `v` of the footprint at frame `l` becomes complex vertex
//! `l · nv + v`; face `f` between frames `l` and `l + 1` becomes voxel
//! `l · nf + f`. Side neighbours repeat the footprint adjacency at every
//! level, top and bottom neighbours link consecutive levels.

use std::collections::HashMap;

use config::constants::MAX_VERTICES;

use crate::core::V3;
use crate::error::{MeshError, MeshResult};
use crate::footprint::{create_footprint_half_edge_mesh, CylinderParameters, FootprintParameters};
use crate::from_params::GeometryBaseData;
use crate::half_edge::{FaceId, HalfEdgeId, HalfEdgeMesh};
use crate::heights::{get_heights, HeightGenerator, ProcessingMethod};

use super::{frames_from_heights, Frame, Voxel, VoxelComplex, VoxelId, VoxelState};

/// Sweeps a footprint through a frame stack.
///
/// # Errors
///
/// Returns [`MeshError::InvalidInput`] for fewer than two frames and
/// [`MeshError::TooManyVertices`] when the stack would exceed the vertex
/// limit.
pub fn sweep_half_edge_mesh(footprint: &HalfEdgeMesh, frames: &[Frame]) -> MeshResult<VoxelComplex> {
    if frames.len() < 2 {
        return Err(MeshError::invalid_input(format!(
            "sweep needs at least 2 frames, got {}",
            frames.len()
        )));
    }
    let vertex_count = footprint.vertex_count();
    let total = vertex_count.saturating_mul(frames.len());
    if total > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: total,
            max: MAX_VERTICES,
        });
    }

    let vertices: Vec<V3> = frames
        .iter()
        .flat_map(|frame| {
            let matrix = frame.to_matrix();
            footprint.vertices().iter().map(move |p| matrix.transform_point3(*p))
        })
        .collect();

    // Where each half-edge sits in its face loop
    let mut slots: HashMap<HalfEdgeId, (FaceId, usize)> = HashMap::with_capacity(footprint.half_edge_count());
    let loops: Vec<Vec<HalfEdgeId>> = (0..footprint.face_count() as u32)
        .map(|f| {
            let edges = footprint.face_half_edges(FaceId(f));
            for (k, edge) in edges.iter().enumerate() {
                slots.insert(*edge, (FaceId(f), k));
            }
            edges
        })
        .collect();

    let face_count = loops.len();
    let levels = frames.len() - 1;
    let voxel_id = |level: usize, face: usize| VoxelId((level * face_count + face) as u32);
    let mut voxels = Vec::with_capacity(levels * face_count);

    for level in 0..levels {
        for (face, edges) in loops.iter().enumerate() {
            let n = edges.len();
            let ring: Vec<u32> = edges.iter().map(|e| footprint.half_edge(*e).vertex.0).collect();
            let bottom = (level * vertex_count) as u32;
            let top = ((level + 1) * vertex_count) as u32;

            let mut indices = Vec::with_capacity(2 * n);
            indices.extend(ring.iter().map(|v| bottom + v));
            indices.extend(ring.iter().map(|v| top + v));

            let mut neighbour_map = Vec::with_capacity(n + 2);
            neighbour_map.push((level + 1 < levels).then(|| (voxel_id(level + 1, face), Voxel::BOTTOM)));
            neighbour_map.push((level > 0).then(|| (voxel_id(level - 1, face), Voxel::TOP)));
            for edge in edges {
                let across = footprint
                    .half_edge(*edge)
                    .neighbour
                    .and_then(|n| slots.get(&n))
                    .map(|(other, k)| (voxel_id(level, other.0 as usize), Voxel::side_face(*k)));
                neighbour_map.push(across);
            }

            let state = footprint
                .face(FaceId(face as u32))
                .meta
                .and_then(|m| m.voxel_state)
                .unwrap_or(VoxelState::Open);

            voxels.push(Voxel {
                id: voxel_id(level, face),
                vertices: indices,
                n,
                neighbour_map,
                state,
                footprint_face: face as u32,
                level,
            });
        }
    }

    tracing::debug!(
        voxels = voxels.len(),
        vertices = vertices.len(),
        levels,
        "voxel complex swept"
    );
    Ok(VoxelComplex::new(voxels, vertices))
}

/// Sweeps a footprint one step along `direction`.
pub fn extrude_half_edge_mesh(footprint: &HalfEdgeMesh, direction: V3) -> MeshResult<VoxelComplex> {
    sweep_half_edge_mesh(footprint, &[Frame::at(V3::ZERO), Frame::at(direction)])
}

/// Straight cylinder complex from a ring layout and a height schedule.
pub fn get_cylinder(cylinder: &CylinderParameters, heights: &HeightGenerator) -> MeshResult<VoxelComplex> {
    let footprint = create_footprint_half_edge_mesh(&FootprintParameters::Cylinder(*cylinder))?;
    let frames = frames_from_heights(&get_heights(heights), &ProcessingMethod::None, &ProcessingMethod::None);
    sweep_half_edge_mesh(&footprint, &frames)
}

/// Complex for a full lamp parameter set, twist and skew included.
pub fn get_voxel_complex_from_geometry_base_data(data: &GeometryBaseData) -> MeshResult<VoxelComplex> {
    let footprint = create_footprint_half_edge_mesh(&data.footprint)?;
    let frames = frames_from_heights(&get_heights(&data.heights), &data.twist, &data.skew);
    sweep_half_edge_mesh(&footprint, &frames)
}
