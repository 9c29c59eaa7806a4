use approx::assert_relative_eq;

use super::*;
use crate::footprint::{create_footprint_half_edge_mesh, FootprintParameters, GridParameters};
use crate::half_edge::HalfEdgeMesh;
use crate::profile::ExtrusionProfile;
use crate::voxel::{sweep_half_edge_mesh, Frame, VoxelId};

fn grid_complex(x: u32, y: u32, levels: usize) -> VoxelComplex {
    let footprint =
        create_footprint_half_edge_mesh(&FootprintParameters::SquareGrid(GridParameters::new(10.0, x, y))).unwrap();
    let frames: Vec<Frame> = (0..=levels).map(|i| Frame::at(V3::new(0.0, 0.0, i as f64 * 10.0))).collect();
    sweep_half_edge_mesh(&footprint, &frames).unwrap()
}

fn square_profile() -> ExtrusionParameters {
    ExtrusionParameters {
        profile: ExtrusionProfile::Square,
        ..ExtrusionParameters::default()
    }
}

fn arc_profile() -> ExtrusionParameters {
    ExtrusionParameters {
        profile: ExtrusionProfile::Arc { radius_top: 0.5 },
        divisions: 4,
        ..ExtrusionParameters::default()
    }
}

#[test]
fn lone_voxel_is_closed_everywhere() {
    for state in [VoxelState::Open, VoxelState::Massive] {
        let mut complex = grid_complex(1, 1, 1);
        complex.set_state(VoxelId(0), state).unwrap();
        let voxel = &complex.voxels()[0];
        for face in 0..voxel.face_count() {
            assert!(is_face_in_voxel_closed(voxel, face, &complex), "{state:?} face {face}");
        }
    }
}

#[test]
fn empty_voxels_close_nothing() {
    let mut complex = grid_complex(1, 1, 1);
    complex.set_state(VoxelId(0), VoxelState::None).unwrap();
    let voxel = &complex.voxels()[0];
    assert!((0..6).all(|face| !is_face_in_voxel_closed(voxel, face, &complex)));
}

#[test]
fn faces_toward_empty_neighbours_close() {
    let mut complex = grid_complex(2, 1, 1);
    let voxel = complex.voxels()[0].clone();
    let shared = (0..4)
        .map(Voxel::side_face)
        .find(|f| voxel.neighbour(*f).is_some())
        .unwrap();
    assert!(!is_face_in_voxel_closed(&voxel, shared, &complex));

    complex.set_state(VoxelId(1), VoxelState::None).unwrap();
    assert!(is_face_in_voxel_closed(&voxel, shared, &complex));
}

#[test]
fn none_and_undefined_are_not_meshed() {
    for state in [VoxelState::None, VoxelState::Undefined] {
        let mut complex = grid_complex(1, 1, 1);
        complex.set_state(VoxelId(0), state).unwrap();
        let mesh = get_mesh_for_voxel(&complex.voxels()[0], &complex, &arc_profile(), None);
        assert!(mesh.is_empty());
    }
}

#[test]
fn massive_voxel_is_a_box() {
    let mut complex = grid_complex(1, 1, 1);
    complex.set_state(VoxelId(0), VoxelState::Massive).unwrap();
    let mesh = get_mesh_for_voxel(&complex.voxels()[0], &complex, &arc_profile(), None);
    assert_eq!(mesh.face_count(), 6);

    let he = HalfEdgeMesh::from_mesh(&mesh);
    assert!(he.naked_half_edges().is_empty());
}

#[test]
fn massive_neighbours_share_no_faces() {
    let mut complex = grid_complex(2, 1, 1);
    complex.set_state(VoxelId(0), VoxelState::Massive).unwrap();
    complex.set_state(VoxelId(1), VoxelState::Massive).unwrap();
    let mesh = get_mesh_for_complex(&complex, &arc_profile());
    assert_eq!(mesh.face_count(), 10);
}

#[test]
fn enclosed_open_voxel_is_a_closed_vault() {
    let complex = grid_complex(3, 3, 3);
    // Center footprint face on the middle level
    let voxel = &complex.voxels()[9 + 4];
    assert!((0..voxel.face_count()).all(|f| !is_face_in_voxel_closed(voxel, f, &complex)));

    let mesh = get_mesh_for_voxel(voxel, &complex, &arc_profile(), None);
    assert!(!mesh.is_empty());
    let he = HalfEdgeMesh::from_mesh(&mesh);
    assert!(he.naked_half_edges().is_empty());
    assert!(he.non_manifold_keys().is_empty());
}

#[test]
fn open_walls_stay_inside_the_voxel() {
    let complex = grid_complex(1, 1, 1);
    let mesh = get_mesh_for_voxel(&complex.voxels()[0], &complex, &arc_profile(), None);
    let (min, max) = mesh.bounding_box();
    assert!(min.x >= -5.0 - 1e-9 && max.x <= 5.0 + 1e-9);
    assert!(min.z >= -1e-9 && max.z <= 10.0 + 1e-9);
}

#[test]
fn closed_sides_get_frames() {
    let alone = grid_complex(1, 1, 1);
    let paired = grid_complex(2, 1, 1);
    let lone = get_mesh_for_voxel(&alone.voxels()[0], &alone, &square_profile(), None);
    let shared = get_mesh_for_voxel(&paired.voxels()[0], &paired, &square_profile(), None);
    assert!(shared.face_count() < lone.face_count());
}

#[test]
fn split_sides_add_up() {
    let complex = grid_complex(2, 2, 1);
    let voxel = &complex.voxels()[0];
    let whole = get_mesh_for_voxel(voxel, &complex, &arc_profile(), None);
    let parts: usize = (0..voxel.n)
        .map(|i| get_mesh_for_voxel(voxel, &complex, &arc_profile(), Some(i)).face_count())
        .sum();
    assert_eq!(parts, whole.face_count());
    assert!(get_mesh_for_voxel(voxel, &complex, &arc_profile(), Some(voxel.n)).is_empty());
}

#[test]
fn faces_are_tagged_with_their_voxel() {
    let complex = grid_complex(2, 1, 2);
    let mesh = get_mesh_for_voxel(&complex.voxels()[3], &complex, &arc_profile(), None);
    let data = mesh.face_data().unwrap();
    assert_eq!(data.len(), mesh.face_count());
    assert!(data
        .iter()
        .all(|m| m.origin_voxel == Some(VoxelId(3)) && m.voxel_state == Some(VoxelState::Open)));
}

#[test]
fn one_direction_builds_a_tunnel() {
    let mut complex = grid_complex(3, 1, 1);
    complex.set_state(VoxelId(1), VoxelState::OneDirection).unwrap();
    let voxel = &complex.voxels()[1];
    let mesh = get_mesh_for_voxel(voxel, &complex, &arc_profile(), None);
    assert!(!mesh.is_empty());
    assert!(mesh
        .face_data()
        .unwrap()
        .iter()
        .all(|m| m.voxel_state == Some(VoxelState::OneDirection)));
    assert!(get_mesh_for_voxel(voxel, &complex, &arc_profile(), Some(2)).is_empty());

    // The open axis faces a neighbour
    let axis = one_direction::open_axis(voxel, &complex);
    assert!(voxel.neighbour(Voxel::side_face(axis)).is_some());
}

#[test]
fn one_direction_falls_back_on_triangles() {
    let footprint =
        create_footprint_half_edge_mesh(&FootprintParameters::TriangleGrid(GridParameters::new(10.0, 1, 1))).unwrap();
    let frames = [Frame::at(V3::ZERO), Frame::at(V3::new(0.0, 0.0, 10.0))];
    let mut complex = sweep_half_edge_mesh(&footprint, &frames).unwrap();
    let open = get_mesh_for_voxel(&complex.voxels()[0], &complex, &arc_profile(), None);
    complex.set_state(VoxelId(0), VoxelState::OneDirection).unwrap();
    let fallback = get_mesh_for_voxel(&complex.voxels()[0], &complex, &arc_profile(), None);
    assert_eq!(open.face_count(), fallback.face_count());
}

#[test]
fn complex_mesh_is_welded() {
    let complex = grid_complex(2, 2, 2);
    let mesh = get_mesh_for_complex(&complex, &arc_profile());
    assert!(mesh.face_count() > 0);
    assert_eq!(mesh.welded().vertex_count(), mesh.vertex_count());
    let count = mesh.vertex_count() as u32;
    assert!(mesh.faces().iter().flatten().all(|i| *i < count));
}

#[test]
fn inset_distance_clamps() {
    assert_relative_eq!(inset_distance(0.0, 10.0, 0.5), 0.5);
    assert_relative_eq!(inset_distance(0.1, 100.0, 0.5), 10.0);
    assert_relative_eq!(inset_distance(0.9, 10.0, 0.5), 4.5);
}

#[test]
fn closing_mesh_without_rim_is_a_cap() {
    let outer = [V3::ZERO, V3::X, V3::new(1.0, 1.0, 0.0), V3::Y];
    let cap = get_closing_mesh(&outer, &[], FaceMetaData::default());
    assert_eq!(cap.face_count(), 1);
    assert_eq!(cap.faces()[0].len(), 4);
}

#[test]
fn closing_mesh_keeps_orientation() {
    let outer = [
        V3::ZERO,
        V3::new(4.0, 0.0, 0.0),
        V3::new(4.0, 4.0, 0.0),
        V3::new(0.0, 4.0, 0.0),
    ];
    let inner = [
        V3::new(1.0, 1.0, 0.0),
        V3::new(2.0, 1.0, 0.0),
        V3::new(3.0, 1.0, 0.0),
        V3::new(3.0, 3.0, 0.0),
        V3::new(1.0, 3.0, 0.0),
    ];
    let frame = get_closing_mesh(&outer, &inner, FaceMetaData::default());
    assert_eq!(frame.face_count(), 9);
    let area: f64 = (0..frame.face_count())
        .map(|f| crate::core::vec3::polygon_normal(&frame.face_positions(f)).z * 0.5)
        .sum();
    assert_relative_eq!(area, 16.0 - 4.0, epsilon = 1e-9);
}

#[test]
fn tunnel_walls_stand_off_closed_sides() {
    let mut complex = grid_complex(1, 1, 1);
    complex.set_state(VoxelId(0), VoxelState::OneDirection).unwrap();
    let voxel = &complex.voxels()[0];
    // A lone voxel opens along side 0, so sides 1 and 3 are the closed laterals
    assert_eq!(one_direction::open_axis(voxel, &complex), 0);
    let mesh = get_mesh_for_voxel(voxel, &complex, &square_profile(), None);
    assert!(mesh.validate());

    let (min, max) = mesh.bounding_box();
    for plane in [min.x, max.x] {
        let on_plane = (0..mesh.face_count())
            .filter(|f| mesh.face_positions(*f).iter().all(|p| (p.x - plane).abs() < 1e-9))
            .count();
        assert_eq!(on_plane, 1);
    }
}

#[test]
fn complex_mesh_validates() {
    for extrusion in [square_profile(), arc_profile()] {
        let mut complex = grid_complex(3, 2, 2);
        complex.set_state(VoxelId(1), VoxelState::OneDirection).unwrap();
        complex.set_state(VoxelId(4), VoxelState::Massive).unwrap();
        assert!(get_mesh_for_complex(&complex, &extrusion).validate());
    }
}

#[test]
fn closing_mesh_drops_collinear_triangles() {
    let outer = [
        V3::ZERO,
        V3::new(5.0, 0.0, 0.0),
        V3::new(10.0, 0.0, 0.0),
        V3::new(10.0, 0.0, 10.0),
        V3::new(5.0, 0.0, 10.0),
        V3::new(0.0, 0.0, 10.0),
    ];
    let inner = [
        V3::new(0.0, 0.0, 1.0),
        V3::new(5.0, 0.0, 1.0),
        V3::new(10.0, 0.0, 1.0),
        V3::new(10.0, 0.0, 9.0),
        V3::new(5.0, 0.0, 9.0),
        V3::new(0.0, 0.0, 9.0),
    ];
    let frame = get_closing_mesh(&outer, &inner, FaceMetaData::default());
    assert!(frame.validate());
    let area: f64 = (0..frame.face_count())
        .map(|f| crate::core::vec3::polygon_area(&frame.face_positions(f)))
        .sum();
    assert_relative_eq!(area, 20.0, epsilon = 1e-9);
}
