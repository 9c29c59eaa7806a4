//! Tunnel voxels.
//!
//! A four-sided voxel open along one axis: the profile is placed on both
//! halves of the front and back faces, the halves are lofted through the
//! voxel and the faces are framed around the arch outline. Walls along a
//! closed lateral face are inset like the walls of an open voxel, and the
//! frames span the band between the face and the inset wall.

use crate::core::{V2, V3};
use crate::profile::ExtrusionParameters;
use crate::voxel::{Voxel, VoxelComplex, VoxelState};

use super::closing::get_closing_mesh;
use super::loft::{place_curve, Column, WallSink};
use super::{face_loop_with_midpoints, is_face_in_voxel_closed};

/// First side with a non-empty neighbour, side 0 otherwise.
pub(crate) fn open_axis(voxel: &Voxel, complex: &VoxelComplex) -> usize {
    (0..voxel.n)
        .find(|i| {
            complex
                .neighbour_state(voxel, Voxel::side_face(*i))
                .is_some_and(|state| state != VoxelState::None)
        })
        .unwrap_or(0)
}

/// Arch outline on a face: starts at the `start` half's outer floor point,
/// crosses the floor, climbs the `end` half and comes back down the `start`
/// half.
fn arch_loop(start: &[V3], end: &[V3]) -> Vec<V3> {
    let mut outline = Vec::with_capacity(start.len() + end.len());
    outline.push(start[1]);
    outline.extend_from_slice(end);
    outline.extend(start[2..start.len() - 1].iter().rev());
    outline
}

/// Builds the tunnel of a four-sided voxel into `sink`.
pub(crate) fn build(
    voxel: &Voxel,
    complex: &VoxelComplex,
    curve: &[V2],
    extrusion: &ExtrusionParameters,
    sink: &mut WallSink,
) {
    let a = open_axis(voxel, complex);
    let c = (a + 2) % 4;
    let columns: Vec<Column> = voxel
        .bottom_ring()
        .iter()
        .zip(voxel.top_ring())
        .map(|(b, t)| Column::new(complex.position(*b), complex.position(*t)))
        .collect();
    let corner = |k: usize| columns[k % 4];

    let front_mid = Column::midpoint(corner(a), corner(a + 1));
    let back_mid = Column::midpoint(corner(a + 2), corner(a + 3));

    // Walls along a closed lateral face stand off it; the face itself is the skin
    let left_closed = is_face_in_voxel_closed(voxel, Voxel::side_face((a + 3) % 4), complex);
    let right_closed = is_face_in_voxel_closed(voxel, Voxel::side_face((a + 1) % 4), complex);

    let left_front = place_curve(curve, corner(a), front_mid, left_closed, extrusion);
    let right_front = place_curve(curve, corner(a + 1), front_mid, right_closed, extrusion);
    let left_back = place_curve(curve, corner(a + 3), back_mid, left_closed, extrusion);
    let right_back = place_curve(curve, corner(a + 2), back_mid, right_closed, extrusion);

    sink.loft(&left_front, &left_back);
    sink.loft(&right_back, &right_front);

    let meta = sink.meta();
    for (side, start, end) in [(a, &left_front, &right_front), (c, &right_back, &left_back)] {
        let outer = face_loop_with_midpoints(voxel, complex, side);
        let frame = get_closing_mesh(&outer, &arch_loop(start, end), meta);
        sink.merge(&frame);
    }

    for face in [Voxel::TOP, Voxel::BOTTOM, Voxel::side_face((a + 1) % 4), Voxel::side_face((a + 3) % 4)] {
        if is_face_in_voxel_closed(voxel, face, complex) {
            sink.polygon(&complex.face_positions(voxel, face));
        }
    }
}
