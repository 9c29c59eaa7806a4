//! # Mesh Data Structure
//!
//! Polygon-soup mesh: vertex positions, polygon index loops and optional
//! per-face metadata. This is both the input of half-edge construction and
//! the final output handed to renderers and exporters.

use std::collections::HashMap;

use config::constants::EPSILON;

use crate::core::{VertexKey, V3};
use crate::voxel::{VoxelId, VoxelState};

/// Metadata carried by one polygon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceMetaData {
    /// Voxel whose wall produced the face
    pub origin_voxel: Option<VoxelId>,
    /// State of that voxel, or the state footprint faces hand to the sweep
    pub voxel_state: Option<VoxelState>,
}

impl FaceMetaData {
    /// Metadata naming only a state.
    pub fn with_state(state: VoxelState) -> Self {
        Self {
            origin_voxel: None,
            voxel_state: Some(state),
        }
    }
}

/// A polygon mesh with vertices and index loops.
///
/// All geometry calculations use f64. Faces with more than three vertices
/// are triangulated on demand by a fan from their first vertex.
///
/// # Example
///
/// ```rust
/// use lamp_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
/// let d = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![a, b, c, d]);
/// assert_eq!(mesh.triangles(), vec![[0, 1, 2], [0, 2, 3]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<V3>,
    faces: Vec<Vec<u32>>,
    /// Parallel to `faces` when present
    face_data: Option<Vec<FaceMetaData>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from raw vertices and faces.
    pub fn from_parts(vertices: Vec<V3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            vertices,
            faces,
            face_data: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: V3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face by vertex indices.
    pub fn add_face(&mut self, indices: Vec<u32>) {
        self.faces.push(indices);
        if let Some(data) = &mut self.face_data {
            data.push(FaceMetaData::default());
        }
    }

    /// Adds a face with metadata.
    pub fn add_face_with_data(&mut self, indices: Vec<u32>, meta: FaceMetaData) {
        let existing = self.faces.len();
        self.faces.push(indices);
        let data = self
            .face_data
            .get_or_insert_with(|| vec![FaceMetaData::default(); existing]);
        data.push(meta);
    }

    /// Adds a polygon from positions, creating fresh vertices.
    pub fn add_polygon(&mut self, points: &[V3], meta: FaceMetaData) {
        let indices = points.iter().map(|p| self.add_vertex(*p)).collect();
        self.add_face_with_data(indices, meta);
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[V3] {
        &self.vertices
    }

    /// Returns the polygon index loops.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the per-face metadata, if any face carries some.
    pub fn face_data(&self) -> Option<&[FaceMetaData]> {
        self.face_data.as_deref()
    }

    /// Returns the metadata of one face.
    pub fn face_meta(&self, face: usize) -> Option<&FaceMetaData> {
        self.face_data.as_ref().and_then(|data| data.get(face))
    }

    /// Returns the positions of one face.
    pub fn face_positions(&self, face: usize) -> Vec<V3> {
        self.faces
            .get(face)
            .map(|loop_| {
                loop_
                    .iter()
                    .filter_map(|i| self.vertices.get(*i as usize).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Merges another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        let existing = self.faces.len();

        self.vertices.extend_from_slice(&other.vertices);
        for face in &other.faces {
            self.faces.push(face.iter().map(|i| i + offset).collect());
        }

        match (&mut self.face_data, &other.face_data) {
            (Some(mine), Some(theirs)) => mine.extend_from_slice(theirs),
            (Some(mine), None) => mine.extend(std::iter::repeat(FaceMetaData::default()).take(other.faces.len())),
            (None, Some(theirs)) => {
                let mut data = vec![FaceMetaData::default(); existing];
                data.extend_from_slice(theirs);
                self.face_data = Some(data);
            }
            (None, None) => {}
        }
    }

    /// Fan triangulation of every face from its first vertex.
    ///
    /// Faces with fewer than three indices are skipped.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let mut result = Vec::with_capacity(self.faces.len() * 2);
        for (index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                tracing::debug!(face = index, arity = face.len(), "skipping degenerate face");
                continue;
            }
            for k in 1..face.len() - 1 {
                result.push([face[0], face[k], face[k + 1]]);
            }
        }
        result
    }

    /// Exports triangle indices as a flat array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles().into_iter().flatten().collect()
    }

    /// Exports vertices as a flat f32 array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Returns a copy with coincident vertices merged by [`VertexKey`].
    ///
    /// Repeated indices inside a face collapse; faces left with fewer than
    /// three distinct vertices or without area are dropped.
    pub fn welded(&self) -> Mesh {
        let mut lookup: HashMap<VertexKey, u32> = HashMap::with_capacity(self.vertices.len());
        let mut vertices = Vec::new();
        let remap: Vec<u32> = self
            .vertices
            .iter()
            .map(|p| {
                *lookup.entry(VertexKey::from(*p)).or_insert_with(|| {
                    vertices.push(*p);
                    (vertices.len() - 1) as u32
                })
            })
            .collect();

        let mut welded = Mesh::from_parts(vertices, Vec::new());
        for (index, face) in self.faces.iter().enumerate() {
            let mut loop_: Vec<u32> = Vec::with_capacity(face.len());
            for i in face {
                let Some(mapped) = remap.get(*i as usize).copied() else {
                    continue;
                };
                if loop_.last() != Some(&mapped) {
                    loop_.push(mapped);
                }
            }
            while loop_.len() > 1 && loop_.first() == loop_.last() {
                loop_.pop();
            }
            if loop_.len() < 3 {
                continue;
            }
            let positions: Vec<V3> = loop_
                .iter()
                .filter_map(|i| welded.vertices.get(*i as usize).copied())
                .collect();
            if crate::core::vec3::polygon_area(&positions) <= EPSILON {
                continue;
            }
            match self.face_meta(index) {
                Some(meta) => welded.add_face_with_data(loop_, *meta),
                None => welded.add_face(loop_),
            }
        }
        welded
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (V3, V3) {
        let Some(first) = self.vertices.first() else {
            return (V3::ZERO, V3::ZERO);
        };
        self.vertices
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - Every face has at least three vertices and a non-zero area
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        self.faces.iter().enumerate().all(|(index, face)| {
            face.len() >= 3
                && face.iter().all(|i| *i < vertex_count)
                && crate::core::vec3::polygon_area(&self.face_positions(index)) > EPSILON
        })
    }
}
