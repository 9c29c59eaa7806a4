//! # Lamp Mesh
//!
//! Geometry kernel for parametric lamps: planar footprints become half-edge
//! meshes, are swept through a stack of frames into a voxel complex, and
//! every voxel is filled with profiled wall geometry.
//!
//! ## Architecture
//!
//! ```text
//! lamp-codec DataTree
//!        │ from_params
//!        ▼
//! footprint ──▶ half_edge ──┐
//! heights ──▶ frames ───────┴─▶ voxel (sweep) ──▶ voxel_mesh ──▶ Mesh
//!                                                   ▲
//!                                             profile
//! ```
//!
//! - [`core`]: `V2`/`V3` aliases and the vertex key
//! - [`mesh`]: polygon-soup output mesh with per-face metadata
//! - [`half_edge`]: connectivity and boundary loops
//! - [`footprint`]: the six footprint families
//! - [`profile`]: wall cross-sections in UV space
//! - [`heights`]: story schedules and angle methods
//! - [`voxel`]: frames, sweeps and the voxel complex
//! - [`voxel_mesh`]: per-voxel wall geometry
//! - [`from_params`]: decoded parameter trees to meshes
//!
//! ## Usage
//!
//! ```rust
//! use lamp_mesh::footprint::{FootprintParameters, GridParameters};
//! use lamp_mesh::from_params::{build_lamp_mesh, GeometryBaseData};
//!
//! let data = GeometryBaseData {
//!     footprint: FootprintParameters::SquareGrid(GridParameters::new(20.0, 2, 2)),
//!     ..GeometryBaseData::default()
//! };
//! let mesh = build_lamp_mesh(&data).unwrap();
//! assert!(mesh.face_count() > 0);
//! ```

pub mod core;
pub mod error;
pub mod footprint;
pub mod from_params;
pub mod half_edge;
pub mod heights;
pub mod mesh;
pub mod profile;
pub mod voxel;
pub mod voxel_mesh;

pub use error::{MeshError, MeshResult};
pub use from_params::{build_lamp_mesh, render_url, GeometryBaseData};
pub use half_edge::HalfEdgeMesh;
pub use mesh::{FaceMetaData, Mesh};
pub use voxel::{VoxelComplex, VoxelState};
