//! # Voxel Meshes
//!
//! Turns each voxel of a complex into wall geometry shaped by the
//! extrusion profile.
//!
//! ## Closed Faces
//!
//! A face is closed when its voxel is not [`VoxelState::None`] and the
//! voxel across it is `None` or missing. Closed faces are what the outside
//! sees, so they get caps, frames or insets; faces shared with filled
//! neighbours do not.
//!
//! ## By State
//!
//! | State | Geometry |
//! |---|---|
//! | None, Undefined | nothing |
//! | Open | a vault per side lofted through three profile curves; closed sides framed around the recessed wall; closed top/bottom capped |
//! | Massive | the closed faces as polygons |
//! | OneDirection | a tunnel along one axis of a four-sided voxel, framed on both ends |
//!
//! ## Profile Curves
//!
//! ```text
//!   top ring  t_k ──── m_t ──── t_k+1
//!              │        │        │        centerline (ring centroids)
//!   front_k ───┤ side_i ┤ front_k+1         ┊
//!              │        │        │          ┊
//!   bottom    b_k ──── m_b ──── b_k+1
//! ```
//!
//! Each curve is the profile mapped onto a quad from an outer column to the
//! voxel centerline. Floor and ceiling insets always apply. The wall inset
//! applies at a face midpoint when that face is closed and at a corner when
//! both faces meeting there are closed.

mod closing;
mod loft;
mod one_direction;

#[cfg(test)]
mod tests;

pub use closing::get_closing_mesh;
pub use loft::inset_distance;

use crate::core::{V2, V3};
use crate::mesh::{FaceMetaData, Mesh};
use crate::profile::{profile_curve, ExtrusionParameters};
use crate::voxel::{Voxel, VoxelComplex, VoxelState};

use loft::{place_curve, Column, WallSink};

/// Whether a face of `voxel` is exposed.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use lamp_mesh::footprint::{create_footprint_half_edge_mesh, FootprintParameters};
/// use lamp_mesh::voxel::extrude_half_edge_mesh;
/// use lamp_mesh::voxel_mesh::is_face_in_voxel_closed;
///
/// let footprint = create_footprint_half_edge_mesh(&FootprintParameters::Square { size: 10.0 }).unwrap();
/// let complex = extrude_half_edge_mesh(&footprint, DVec3::new(0.0, 0.0, 10.0)).unwrap();
/// let voxel = &complex.voxels()[0];
/// assert!((0..6).all(|face| is_face_in_voxel_closed(voxel, face, &complex)));
/// ```
pub fn is_face_in_voxel_closed(voxel: &Voxel, face: usize, complex: &VoxelComplex) -> bool {
    if voxel.state == VoxelState::None {
        return false;
    }
    match complex.neighbour_state(voxel, face) {
        None | Some(VoxelState::None) => true,
        Some(_) => false,
    }
}

/// Wall geometry of one voxel.
///
/// `split_index` restricts the output to one side; `Some(0)` also carries
/// the top and bottom caps. Tunnel voxels are built whole for `None` and
/// `Some(0)` and skipped for other indices.
pub fn get_mesh_for_voxel(
    voxel: &Voxel,
    complex: &VoxelComplex,
    extrusion: &ExtrusionParameters,
    split_index: Option<usize>,
) -> Mesh {
    let meta = FaceMetaData {
        origin_voxel: Some(voxel.id),
        voxel_state: Some(voxel.state),
    };
    let mut sink = WallSink::new(meta);
    let curve = profile_curve(&extrusion.profile, extrusion.divisions);

    match voxel.state {
        VoxelState::None | VoxelState::Undefined => {}
        VoxelState::OneDirection if voxel.n == 4 => {
            if matches!(split_index, None | Some(0)) {
                one_direction::build(voxel, complex, &curve, extrusion, &mut sink);
            }
        }
        state => {
            if state == VoxelState::OneDirection {
                tracing::warn!(
                    voxel = voxel.id.0,
                    sides = voxel.n,
                    "one-direction voxel is not four-sided, building standard walls"
                );
            }
            let massive = state == VoxelState::Massive;
            let sides: Vec<usize> = match split_index {
                Some(i) if i < voxel.n => vec![i],
                Some(_) => Vec::new(),
                None => (0..voxel.n).collect(),
            };
            let columns = columns(voxel, complex);
            for side in sides {
                if massive {
                    massive_side(voxel, complex, side, &mut sink);
                } else {
                    open_side(voxel, complex, &columns, side, &curve, extrusion, &mut sink);
                }
            }
            if matches!(split_index, None | Some(0)) {
                for face in [Voxel::TOP, Voxel::BOTTOM] {
                    if is_face_in_voxel_closed(voxel, face, complex) {
                        sink.polygon(&complex.face_positions(voxel, face));
                    }
                }
            }
        }
    }
    sink.finish()
}

/// Walls of every voxel, welded into one mesh.
pub fn get_mesh_for_complex(complex: &VoxelComplex, extrusion: &ExtrusionParameters) -> Mesh {
    let mut mesh = Mesh::new();
    for voxel in complex.voxels() {
        mesh.merge(&get_mesh_for_voxel(voxel, complex, extrusion, None));
    }
    let welded = mesh.welded();
    tracing::debug!(
        voxels = complex.voxel_count(),
        vertices = welded.vertex_count(),
        faces = welded.face_count(),
        "voxel meshes built"
    );
    welded
}

// =============================================================================
// STANDARD PATH
// =============================================================================

struct Columns {
    corners: Vec<Column>,
    center: Column,
}

fn columns(voxel: &Voxel, complex: &VoxelComplex) -> Columns {
    let corners = voxel
        .bottom_ring()
        .iter()
        .zip(voxel.top_ring())
        .map(|(b, t)| Column::new(complex.position(*b), complex.position(*t)))
        .collect();
    let (bottom, top) = complex.ring_centers(voxel);
    Columns {
        corners,
        center: Column::new(bottom, top),
    }
}

/// Side face loop with the edge midpoints inserted, bottom first.
pub(crate) fn face_loop_with_midpoints(voxel: &Voxel, complex: &VoxelComplex, side: usize) -> Vec<V3> {
    let face = complex.face_positions(voxel, Voxel::side_face(side));
    if face.len() != 4 {
        return face;
    }
    vec![
        face[0],
        (face[0] + face[1]) * 0.5,
        face[1],
        face[2],
        (face[2] + face[3]) * 0.5,
        face[3],
    ]
}

fn massive_side(voxel: &Voxel, complex: &VoxelComplex, side: usize, sink: &mut WallSink) {
    let face = Voxel::side_face(side);
    if is_face_in_voxel_closed(voxel, face, complex) {
        sink.polygon(&complex.face_positions(voxel, face));
    }
}

fn open_side(
    voxel: &Voxel,
    complex: &VoxelComplex,
    columns: &Columns,
    side: usize,
    curve: &[V2],
    extrusion: &ExtrusionParameters,
    sink: &mut WallSink,
) {
    let n = voxel.n;
    let (k, k1) = (side, (side + 1) % n);
    let closed = |i: usize| is_face_in_voxel_closed(voxel, Voxel::side_face(i % n), complex);
    let side_closed = closed(side);

    // A corner is inset only when both faces meeting there are closed
    let front_k = place_curve(
        curve,
        columns.corners[k],
        columns.center,
        closed(side + n - 1) && side_closed,
        extrusion,
    );
    let front_k1 = place_curve(
        curve,
        columns.corners[k1],
        columns.center,
        side_closed && closed(side + 1),
        extrusion,
    );
    let middle = Column::midpoint(columns.corners[k], columns.corners[k1]);
    let side_curve = place_curve(curve, middle, columns.center, side_closed, extrusion);

    sink.loft(&front_k, &side_curve);
    sink.loft(&side_curve, &front_k1);

    if side_closed {
        // Floor curves are two points, so the wall runs from index 1 to 2
        let (floor, wall_top) = (1, 2);
        let rim = [
            front_k[floor],
            side_curve[floor],
            front_k1[floor],
            front_k1[wall_top],
            side_curve[wall_top],
            front_k[wall_top],
        ];
        let outer = face_loop_with_midpoints(voxel, complex, side);
        let frame = get_closing_mesh(&outer, &rim, sink.meta());
        sink.merge(&frame);
    }
}

