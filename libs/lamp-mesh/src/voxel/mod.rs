//! # Voxel Complex
//!
//! The 3D cell complex swept from a footprint. One voxel per footprint face
//! per story; vertices are shared between the stories they bound.
//!
//! ## Face Indices
//!
//! | Index | Face | Loop |
//! |---|---|---|
//! | 0 | top | top ring |
//! | 1 | bottom | bottom ring reversed |
//! | `i + 2` | side `i` | `b[i], b[i+1], t[i+1], t[i]` |
//!
//! Every loop runs counter-clockwise seen from outside the voxel.

mod frame;
mod sweep;

#[cfg(test)]
mod tests;

pub use frame::{frames_from_heights, Frame};
pub use sweep::{
    extrude_half_edge_mesh, get_cylinder, get_voxel_complex_from_geometry_base_data, sweep_half_edge_mesh,
};

use crate::core::{vec3, V3};
use crate::error::{MeshError, MeshResult};

/// Index of a voxel in one complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelId(pub u32);

/// How a voxel is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoxelState {
    /// Empty; never meshed and exposes its neighbours' faces
    None,
    /// Hollow cell with a profiled vault
    #[default]
    Open,
    /// Solid cell
    Massive,
    /// Tunnel along one axis of a four-sided cell
    OneDirection,
    /// Not yet decided; never meshed
    Undefined,
}

/// One cell of the complex.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxel {
    /// Id, equal to the voxel's position in the complex
    pub id: VoxelId,
    /// Bottom ring then top ring, `2n` complex vertex indices
    pub vertices: Vec<u32>,
    /// Number of sides
    pub n: usize,
    /// Neighbour across each face, `n + 2` entries
    pub neighbour_map: Vec<Option<(VoxelId, usize)>>,
    /// Fill state
    pub state: VoxelState,
    /// Index of the footprint face the voxel was swept from
    pub footprint_face: u32,
    /// Story index, 0 at the bottom
    pub level: usize,
}

impl Voxel {
    /// Face index of the top face.
    pub const TOP: usize = 0;
    /// Face index of the bottom face.
    pub const BOTTOM: usize = 1;

    /// Face index of side `i`.
    #[inline]
    pub fn side_face(i: usize) -> usize {
        i + 2
    }

    /// Number of faces, `n + 2`.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.n + 2
    }

    /// Bottom ring vertex indices.
    pub fn bottom_ring(&self) -> &[u32] {
        &self.vertices[..self.n]
    }

    /// Top ring vertex indices.
    pub fn top_ring(&self) -> &[u32] {
        &self.vertices[self.n..]
    }

    /// Neighbour across `face`, with the neighbour's index for that face.
    pub fn neighbour(&self, face: usize) -> Option<(VoxelId, usize)> {
        self.neighbour_map.get(face).copied().flatten()
    }

    /// Vertex loop of a face, see the module table.
    pub fn face_loop(&self, face: usize) -> Vec<u32> {
        let (bottom, top) = (self.bottom_ring(), self.top_ring());
        match face {
            Self::TOP => top.to_vec(),
            Self::BOTTOM => bottom.iter().rev().copied().collect(),
            side if side < self.face_count() => {
                let i = side - 2;
                let j = (i + 1) % self.n;
                vec![bottom[i], bottom[j], top[j], top[i]]
            }
            _ => Vec::new(),
        }
    }
}

/// Voxels and their shared vertex pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoxelComplex {
    voxels: Vec<Voxel>,
    vertices: Vec<V3>,
}

impl VoxelComplex {
    /// Wraps prepared voxels and vertices.
    pub fn new(voxels: Vec<Voxel>, vertices: Vec<V3>) -> Self {
        Self { voxels, vertices }
    }

    /// All voxels, indexed by id.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Shared vertex positions.
    pub fn vertices(&self) -> &[V3] {
        &self.vertices
    }

    /// Number of voxels.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// A voxel by id.
    pub fn voxel(&self, id: VoxelId) -> Option<&Voxel> {
        self.voxels.get(id.0 as usize)
    }

    /// Position of a complex vertex.
    #[inline]
    pub fn position(&self, index: u32) -> V3 {
        self.vertices[index as usize]
    }

    /// Positions of a voxel's vertex indices.
    pub fn positions(&self, indices: &[u32]) -> Vec<V3> {
        indices.iter().map(|i| self.position(*i)).collect()
    }

    /// Positions of one face of a voxel.
    pub fn face_positions(&self, voxel: &Voxel, face: usize) -> Vec<V3> {
        self.positions(&voxel.face_loop(face))
    }

    /// State of the voxel across `face`, `None` when there is no neighbour.
    pub fn neighbour_state(&self, voxel: &Voxel, face: usize) -> Option<VoxelState> {
        voxel
            .neighbour(face)
            .and_then(|(id, _)| self.voxel(id))
            .map(|v| v.state)
    }

    /// Centroid of a voxel's bottom and top rings.
    pub fn ring_centers(&self, voxel: &Voxel) -> (V3, V3) {
        (
            vec3::centroid(&self.positions(voxel.bottom_ring())),
            vec3::centroid(&self.positions(voxel.top_ring())),
        )
    }

    /// Overrides the state of one voxel.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidInput`] for an unknown id.
    pub fn set_state(&mut self, id: VoxelId, state: VoxelState) -> MeshResult<()> {
        let voxel = self
            .voxels
            .get_mut(id.0 as usize)
            .ok_or_else(|| MeshError::invalid_input(format!("no voxel {}", id.0)))?;
        voxel.state = state;
        Ok(())
    }

    /// Checks ids, vertex ranges and neighbour-map symmetry.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidTopology`] naming the first violation.
    pub fn validate(&self) -> MeshResult<()> {
        for (index, voxel) in self.voxels.iter().enumerate() {
            if voxel.id.0 as usize != index {
                return Err(MeshError::invalid_topology(format!("voxel {index} carries id {}", voxel.id.0)));
            }
            if voxel.vertices.len() != 2 * voxel.n || voxel.neighbour_map.len() != voxel.n + 2 {
                return Err(MeshError::invalid_topology(format!("voxel {index} has inconsistent sizes")));
            }
            if voxel.vertices.iter().any(|v| *v as usize >= self.vertices.len()) {
                return Err(MeshError::invalid_topology(format!("voxel {index} vertex out of range")));
            }
            for (face, entry) in voxel.neighbour_map.iter().enumerate() {
                let Some((other, other_face)) = entry else {
                    continue;
                };
                let back = self.voxel(*other).and_then(|w| w.neighbour(*other_face));
                if back != Some((voxel.id, face)) {
                    return Err(MeshError::invalid_topology(format!(
                        "voxel {index} face {face} neighbour is not symmetric"
                    )));
                }
            }
        }
        Ok(())
    }
}
