//! # Footprint Factory
//!
//! Planar polygon meshes that define a lamp's cross-section, one family per
//! [`FootprintParameters`] variant. Every family computes its vertices in
//! closed form and emits counter-clockwise polygons in the `z = 0` plane.
//!
//! ## Families
//!
//! | Family | Cells |
//! |---|---|
//! | Square | one quad |
//! | SquareGrid | `x × y` quads |
//! | TriangleGrid | two triangles per cell, alternating row offset |
//! | HexGrid | pointy-top hexagons, offset rows |
//! | Cylinder | polar rings of quads |
//! | MalculmiusOne | lobed shards around a core polygon |
//!
//! Grid families support a shell mode that keeps only the cells within a
//! band along the grid edge. Core polygons of radial families are tagged
//! [`VoxelState::None`] so the sweep leaves them hollow.

mod cylinder;
mod grid;
mod malculmius;


use std::collections::HashMap;

use config::constants::MAX_VERTICES;

use crate::core::{VertexKey, V2, V3};
use crate::error::{MeshError, MeshResult};
use crate::half_edge::HalfEdgeMesh;
use crate::mesh::{FaceMetaData, Mesh};
use crate::voxel::VoxelState;

pub use cylinder::CylinderParameters;
pub use grid::GridParameters;
pub use malculmius::MalculmiusParameters;

/// Footprint family and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum FootprintParameters {
    /// Single square of side `size`
    Square {
        /// Side length
        size: f64,
    },
    /// Grid of squares
    SquareGrid(GridParameters),
    /// Grid of equilateral triangles
    TriangleGrid(GridParameters),
    /// Grid of hexagons
    HexGrid(GridParameters),
    /// Concentric rings of quads
    Cylinder(CylinderParameters),
    /// Lobed radial shape
    MalculmiusOne(MalculmiusParameters),
}

impl Default for FootprintParameters {
    fn default() -> Self {
        FootprintParameters::Cylinder(CylinderParameters::default())
    }
}

/// Builds the polygon mesh of a footprint.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] for counts below one, fewer than
/// three cylinder segments or lobes, or non-positive sizes.
///
/// # Example
///
/// ```rust
/// use lamp_mesh::footprint::{create_footprint_mesh, FootprintParameters, GridParameters};
///
/// let grid = FootprintParameters::SquareGrid(GridParameters::new(20.0, 3, 3));
/// let mesh = create_footprint_mesh(&grid).unwrap();
/// assert_eq!(mesh.face_count(), 9);
/// assert!(mesh.faces().iter().all(|f| f.len() == 4));
/// ```
pub fn create_footprint_mesh(footprint: &FootprintParameters) -> MeshResult<Mesh> {
    let mesh = match footprint {
        FootprintParameters::Square { size } => grid::square_grid(&GridParameters::new(*size, 1, 1))?,
        FootprintParameters::SquareGrid(params) => grid::square_grid(params)?,
        FootprintParameters::TriangleGrid(params) => grid::triangle_grid(params)?,
        FootprintParameters::HexGrid(params) => grid::hex_grid(params)?,
        FootprintParameters::Cylinder(params) => cylinder::cylinder(params)?,
        FootprintParameters::MalculmiusOne(params) => malculmius::malculmius_one(params)?,
    };
    tracing::debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "footprint mesh created"
    );
    Ok(mesh)
}

/// Builds the half-edge form of a footprint.
pub fn create_footprint_half_edge_mesh(footprint: &FootprintParameters) -> MeshResult<HalfEdgeMesh> {
    create_footprint_mesh(footprint).map(|mesh| HalfEdgeMesh::from_mesh(&mesh))
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Accumulates planar polygons, sharing vertices by [`VertexKey`].
pub(crate) struct FootprintBuilder {
    mesh: Mesh,
    lookup: HashMap<VertexKey, u32>,
}

impl FootprintBuilder {
    pub(crate) fn new() -> Self {
        Self {
            mesh: Mesh::new(),
            lookup: HashMap::new(),
        }
    }

    fn vertex(&mut self, point: V2) -> MeshResult<u32> {
        let position = V3::new(point.x, point.y, 0.0);
        let key = VertexKey::from(position);
        if let Some(index) = self.lookup.get(&key) {
            return Ok(*index);
        }
        if self.mesh.vertex_count() >= MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: self.mesh.vertex_count() + 1,
                max: MAX_VERTICES,
            });
        }
        let index = self.mesh.add_vertex(position);
        self.lookup.insert(key, index);
        Ok(index)
    }

    /// Adds a counter-clockwise polygon. Repeated points collapse; polygons
    /// left with fewer than three vertices are dropped.
    pub(crate) fn polygon(&mut self, points: &[V2], state: Option<VoxelState>) -> MeshResult<()> {
        let mut loop_: Vec<u32> = Vec::with_capacity(points.len());
        for point in points {
            let index = self.vertex(*point)?;
            if loop_.last() != Some(&index) {
                loop_.push(index);
            }
        }
        while loop_.len() > 1 && loop_.first() == loop_.last() {
            loop_.pop();
        }
        if loop_.len() < 3 {
            return Ok(());
        }
        let meta = FaceMetaData {
            origin_voxel: None,
            voxel_state: state,
        };
        self.mesh.add_face_with_data(loop_, meta);
        Ok(())
    }

    pub(crate) fn finish(self) -> Mesh {
        self.mesh
    }
}

pub(crate) fn require(condition: bool, message: impl FnOnce() -> String) -> MeshResult<()> {
    if condition {
        Ok(())
    } else {
        Err(MeshError::invalid_parameter(message()))
    }
}
