//! # Half-Edge Mesh
//!
//! Boundary representation built from a polygon-soup [`Mesh`], using
//! index-based references scoped to one build.
//!
//! ## Construction
//!
//! ```text
//! Mesh { vertices, faces }
//!   │ dedup vertices by VertexKey
//!   │ one half-edge per face edge, next/previous linked cyclically
//!   │ index half-edges by undirected vertex pair
//!   ▼ pair keys seen exactly twice as neighbours
//! HalfEdgeMesh
//! ```
//!
//! ## Non-Manifold Edges
//!
//! A vertex pair shared by three or more half-edges has no well-defined
//! neighbour. Such half-edges stay naked and the pair is reported by
//! [`HalfEdgeMesh::non_manifold_keys`].

mod boundary;


use std::collections::HashMap;

use crate::core::{VertexKey, V3};
use crate::error::{MeshError, MeshResult};
use crate::mesh::{FaceMetaData, Mesh};

/// Index of a vertex in one half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Index of a half-edge in one half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub u32);

/// Index of a face in one half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

/// Directed edge owned by one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Start vertex
    pub vertex: VertexId,
    /// Next half-edge around the face
    pub next: HalfEdgeId,
    /// Previous half-edge around the face
    pub previous: HalfEdgeId,
    /// Opposite half-edge on the adjacent face, `None` on the boundary
    pub neighbour: Option<HalfEdgeId>,
    /// Owning face
    pub face: FaceId,
}

/// A face and one of its half-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdgeFace {
    /// First half-edge of the face loop
    pub edge: HalfEdgeId,
    /// Metadata copied from the source polygon
    pub meta: Option<FaceMetaData>,
}

/// Half-edge boundary representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalfEdgeMesh {
    vertices: Vec<V3>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<HalfEdgeFace>,
    non_manifold: Vec<(VertexId, VertexId)>,
}

fn undirected(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl HalfEdgeMesh {
    /// Builds the half-edge form of a polygon mesh.
    ///
    /// Faces with fewer than three distinct vertices, or with indices past
    /// the vertex list, are skipped with a diagnostic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use lamp_mesh::{HalfEdgeMesh, Mesh};
    ///
    /// let mesh = Mesh::from_parts(
    ///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)],
    ///     vec![vec![0, 1, 2], vec![1, 3, 2]],
    /// );
    /// let he = HalfEdgeMesh::from_mesh(&mesh);
    /// assert_eq!(he.face_count(), 2);
    /// assert_eq!(he.naked_half_edges().len(), 4);
    /// ```
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut result = HalfEdgeMesh::default();

        // Vertex dedup
        let mut lookup: HashMap<VertexKey, VertexId> = HashMap::new();
        let remap: Vec<VertexId> = mesh
            .vertices()
            .iter()
            .map(|p| {
                *lookup.entry(VertexKey::from(*p)).or_insert_with(|| {
                    result.vertices.push(*p);
                    VertexId((result.vertices.len() - 1) as u32)
                })
            })
            .collect();

        let mut edge_map: HashMap<(VertexId, VertexId), Vec<HalfEdgeId>> = HashMap::new();

        for (index, face) in mesh.faces().iter().enumerate() {
            let Some(loop_) = face_loop(face, &remap) else {
                tracing::warn!(face = index, "skipping face with out-of-range vertex index");
                continue;
            };
            if loop_.len() < 3 {
                tracing::warn!(face = index, vertices = loop_.len(), "skipping degenerate face");
                continue;
            }

            let face_id = FaceId(result.faces.len() as u32);
            let first = result.half_edges.len() as u32;
            let n = loop_.len() as u32;
            for (k, vertex) in loop_.iter().enumerate() {
                let k = k as u32;
                let id = HalfEdgeId(first + k);
                result.half_edges.push(HalfEdge {
                    vertex: *vertex,
                    next: HalfEdgeId(first + (k + 1) % n),
                    previous: HalfEdgeId(first + (k + n - 1) % n),
                    neighbour: None,
                    face: face_id,
                });
                let end = loop_[((k + 1) % n) as usize];
                edge_map.entry(undirected(*vertex, end)).or_default().push(id);
            }
            result.faces.push(HalfEdgeFace {
                edge: HalfEdgeId(first),
                meta: mesh.face_meta(index).copied(),
            });
        }

        let mut non_manifold = Vec::new();
        for (key, edges) in &edge_map {
            match edges.as_slice() {
                [a, b] => {
                    result.half_edges[a.0 as usize].neighbour = Some(*b);
                    result.half_edges[b.0 as usize].neighbour = Some(*a);
                }
                [_] => {}
                _ => non_manifold.push(*key),
            }
        }
        if !non_manifold.is_empty() {
            non_manifold.sort();
            tracing::warn!(
                count = non_manifold.len(),
                "vertex pairs shared by more than two half-edges left unpaired"
            );
        }
        result.non_manifold = non_manifold;

        result
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of half-edges.
    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the vertex positions.
    pub fn vertices(&self) -> &[V3] {
        &self.vertices
    }

    /// Returns all half-edges.
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Returns all faces.
    pub fn faces(&self) -> &[HalfEdgeFace] {
        &self.faces
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, id: VertexId) -> V3 {
        self.vertices[id.0 as usize]
    }

    /// A half-edge by id.
    #[inline]
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0 as usize]
    }

    /// A face by id.
    #[inline]
    pub fn face(&self, id: FaceId) -> &HalfEdgeFace {
        &self.faces[id.0 as usize]
    }

    /// End vertex of a half-edge (start of its successor).
    pub fn end_vertex(&self, id: HalfEdgeId) -> VertexId {
        self.half_edge(self.half_edge(id).next).vertex
    }

    /// Half-edges of a face in loop order, starting at the face's edge.
    pub fn face_half_edges(&self, face: FaceId) -> Vec<HalfEdgeId> {
        let start = self.face(face).edge;
        let mut result = vec![start];
        let mut current = self.half_edge(start).next;
        while current != start && result.len() <= self.half_edges.len() {
            result.push(current);
            current = self.half_edge(current).next;
        }
        result
    }

    /// Vertex ids of a face in loop order.
    pub fn face_vertex_ids(&self, face: FaceId) -> Vec<VertexId> {
        self.face_half_edges(face)
            .into_iter()
            .map(|h| self.half_edge(h).vertex)
            .collect()
    }

    /// Vertex positions of a face in loop order.
    pub fn face_positions(&self, face: FaceId) -> Vec<V3> {
        self.face_vertex_ids(face)
            .into_iter()
            .map(|v| self.position(v))
            .collect()
    }

    /// Half-edges without a neighbour, in id order.
    pub fn naked_half_edges(&self) -> Vec<HalfEdgeId> {
        (0..self.half_edges.len() as u32)
            .map(HalfEdgeId)
            .filter(|h| self.half_edge(*h).neighbour.is_none())
            .collect()
    }

    /// Undirected vertex pairs that were shared by three or more half-edges.
    pub fn non_manifold_keys(&self) -> &[(VertexId, VertexId)] {
        &self.non_manifold
    }

    /// Converts back into a polygon mesh, keeping face metadata.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::from_parts(self.vertices.clone(), Vec::new());
        for (index, face) in self.faces.iter().enumerate() {
            let loop_ = self
                .face_vertex_ids(FaceId(index as u32))
                .into_iter()
                .map(|v| v.0)
                .collect();
            match face.meta {
                Some(meta) => mesh.add_face_with_data(loop_, meta),
                None => mesh.add_face(loop_),
            }
        }
        mesh
    }

    /// Checks the structural invariants.
    ///
    /// - every `next`/`previous` pair is mutual and each face loop closes
    /// - neighbours are symmetric and share the same undirected vertex pair
    /// - every half-edge's face exists
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidTopology`] naming the first violation.
    pub fn validate(&self) -> MeshResult<()> {
        let count = self.half_edges.len();
        for (index, he) in self.half_edges.iter().enumerate() {
            let id = HalfEdgeId(index as u32);
            if he.next.0 as usize >= count || he.previous.0 as usize >= count {
                return Err(MeshError::invalid_topology(format!("half-edge {index} links out of range")));
            }
            if he.face.0 as usize >= self.faces.len() {
                return Err(MeshError::invalid_topology(format!("half-edge {index} has no face")));
            }
            if self.half_edge(he.next).previous != id {
                return Err(MeshError::invalid_topology(format!("half-edge {index} next/previous mismatch")));
            }
            if let Some(n) = he.neighbour {
                if n.0 as usize >= count || self.half_edge(n).neighbour != Some(id) {
                    return Err(MeshError::invalid_topology(format!("half-edge {index} neighbour not symmetric")));
                }
                let mine = undirected(he.vertex, self.end_vertex(id));
                let theirs = undirected(self.half_edge(n).vertex, self.end_vertex(n));
                if mine != theirs {
                    return Err(MeshError::invalid_topology(format!(
                        "half-edge {index} neighbour spans a different vertex pair"
                    )));
                }
            }
        }

        for (index, face) in self.faces.iter().enumerate() {
            let loop_ = self.face_half_edges(FaceId(index as u32));
            let closes = self.half_edge(*loop_.last().unwrap_or(&face.edge)).next == face.edge;
            if !closes || loop_.iter().any(|h| self.half_edge(*h).face.0 as usize != index) {
                return Err(MeshError::invalid_topology(format!("face {index} loop does not close")));
            }
        }
        Ok(())
    }
}

/// Maps a face's indices to deduplicated vertex ids, dropping repeats.
fn face_loop(face: &[u32], remap: &[VertexId]) -> Option<Vec<VertexId>> {
    let mut loop_: Vec<VertexId> = Vec::with_capacity(face.len());
    for index in face {
        let id = *remap.get(*index as usize)?;
        if loop_.last() != Some(&id) {
            loop_.push(id);
        }
    }
    while loop_.len() > 1 && loop_.first() == loop_.last() {
        loop_.pop();
    }
    Some(loop_)
}
