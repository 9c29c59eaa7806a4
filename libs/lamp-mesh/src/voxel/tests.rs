use approx::assert_relative_eq;

use super::*;
use crate::core::vec3::polygon_normal;
use crate::footprint::{create_footprint_half_edge_mesh, CylinderParameters, FootprintParameters, GridParameters};
use crate::half_edge::HalfEdgeMesh;
use crate::heights::{HeightGenerator, ProcessingMethod};

fn grid(x: u32, y: u32) -> HalfEdgeMesh {
    create_footprint_half_edge_mesh(&FootprintParameters::SquareGrid(GridParameters::new(10.0, x, y))).unwrap()
}

fn stack(levels: usize) -> Vec<Frame> {
    (0..=levels).map(|i| Frame::at(V3::new(0.0, 0.0, i as f64 * 10.0))).collect()
}

#[test]
fn sweep_needs_two_frames() {
    let footprint = grid(1, 1);
    for frames in [vec![], stack(0)] {
        assert!(matches!(
            sweep_half_edge_mesh(&footprint, &frames),
            Err(MeshError::InvalidInput { .. })
        ));
    }
}

#[test]
fn sweep_ids_follow_levels() {
    let footprint = grid(2, 1);
    let complex = sweep_half_edge_mesh(&footprint, &stack(3)).unwrap();
    assert_eq!(complex.voxel_count(), 6);
    assert_eq!(complex.vertices().len(), 6 * 4);

    let voxel = complex.voxel(VoxelId(3)).unwrap();
    assert_eq!(voxel.level, 1);
    assert_eq!(voxel.footprint_face, 1);
    assert_eq!(voxel.n, 4);
    assert_eq!(voxel.vertices.len(), 8);
    for (b, t) in voxel.bottom_ring().iter().zip(voxel.top_ring()) {
        assert_eq!(t - b, 6);
        assert_relative_eq!(complex.position(*t).z - complex.position(*b).z, 10.0);
    }
}

#[test]
fn neighbour_map_is_symmetric() {
    let complex = sweep_half_edge_mesh(&grid(3, 3), &stack(3)).unwrap();
    complex.validate().unwrap();
    for voxel in complex.voxels() {
        for face in 0..voxel.face_count() {
            if let Some((other, back)) = voxel.neighbour(face) {
                let w = complex.voxel(other).unwrap();
                assert_eq!(w.neighbour(back), Some((voxel.id, face)));
            }
        }
    }
}

#[test]
fn stack_ends_have_no_vertical_neighbours() {
    let complex = sweep_half_edge_mesh(&grid(1, 1), &stack(2)).unwrap();
    let (lower, upper) = (&complex.voxels()[0], &complex.voxels()[1]);
    assert_eq!(lower.neighbour(Voxel::BOTTOM), None);
    assert_eq!(lower.neighbour(Voxel::TOP), Some((VoxelId(1), Voxel::BOTTOM)));
    assert_eq!(upper.neighbour(Voxel::TOP), None);
    assert_eq!(upper.neighbour(Voxel::BOTTOM), Some((VoxelId(0), Voxel::TOP)));
}

#[test]
fn center_voxel_has_four_side_neighbours() {
    let complex = sweep_half_edge_mesh(&grid(3, 3), &stack(1)).unwrap();
    let center = &complex.voxels()[4];
    let sides = (0..4).filter(|i| center.neighbour(Voxel::side_face(*i)).is_some()).count();
    assert_eq!(sides, 4);
    let corner = &complex.voxels()[0];
    let sides = (0..4).filter(|i| corner.neighbour(Voxel::side_face(*i)).is_some()).count();
    assert_eq!(sides, 2);
}

#[test]
fn face_loops_point_outward() {
    let complex = extrude_half_edge_mesh(&grid(1, 1), V3::new(0.0, 0.0, 10.0)).unwrap();
    let voxel = &complex.voxels()[0];
    let (bottom, top) = complex.ring_centers(voxel);
    let center = (bottom + top) * 0.5;
    for face in 0..voxel.face_count() {
        let points = complex.face_positions(voxel, face);
        let normal = polygon_normal(&points);
        let outward = crate::core::vec3::centroid(&points) - center;
        assert!(normal.dot(outward) > 0.0, "face {face}");
    }
}

#[test]
fn states_come_from_footprint_metadata() {
    let cylinder = CylinderParameters {
        inner_radius: 0.0,
        segments: 4,
        ..CylinderParameters::default()
    };
    let complex = get_cylinder(&cylinder, &HeightGenerator::absolute(2, 50.0, ProcessingMethod::None)).unwrap();
    assert_eq!(complex.voxel_count(), 10);
    assert_eq!(complex.voxels()[0].state, VoxelState::None);
    assert!(complex.voxels()[1..5].iter().all(|v| v.state == VoxelState::Open));
    complex.validate().unwrap();
}

#[test]
fn set_state_checks_the_id() {
    let mut complex = extrude_half_edge_mesh(&grid(1, 1), V3::Z).unwrap();
    complex.set_state(VoxelId(0), VoxelState::Massive).unwrap();
    assert_eq!(complex.voxels()[0].state, VoxelState::Massive);
    assert!(complex.set_state(VoxelId(9), VoxelState::Open).is_err());
}

#[test]
fn validate_rejects_one_sided_links() {
    let complex = sweep_half_edge_mesh(&grid(2, 1), &stack(1)).unwrap();
    let mut voxels = complex.voxels().to_vec();
    voxels[0].neighbour_map[Voxel::TOP] = Some((VoxelId(1), Voxel::BOTTOM));
    let broken = VoxelComplex::new(voxels, complex.vertices().to_vec());
    assert!(matches!(broken.validate(), Err(MeshError::InvalidTopology { .. })));
}

#[test]
fn twisted_frames_rotate_the_footprint() {
    let twist = ProcessingMethod::Incremental {
        angle: 90.0,
        total: None,
    };
    let frames = frames_from_heights(&[0.0, 10.0], &twist, &ProcessingMethod::None);
    let p = frames[1].transform_point(V3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 1.0);
    assert_relative_eq!(p.z, 10.0);
}

#[test]
fn skew_accumulates_per_story() {
    let skew = ProcessingMethod::Incremental {
        angle: 45.0,
        total: None,
    };
    // Story 0 has angle 0, story 1 has 45°
    let frames = frames_from_heights(&[0.0, 10.0, 30.0], &ProcessingMethod::None, &skew);
    assert_relative_eq!(frames[1].origin.x, 0.0);
    assert_relative_eq!(frames[2].origin.x, 20.0, epsilon = 1e-9);
}

#[test]
fn frame_matrix_has_axes_as_columns() {
    let frame = Frame::rotated(V3::new(1.0, 2.0, 3.0), std::f64::consts::FRAC_PI_2);
    let m = frame.to_matrix();
    assert_relative_eq!(m.w_axis.x, 1.0);
    assert_relative_eq!(m.x_axis.y, 1.0);
    assert_relative_eq!(frame.transform_point(V3::ZERO).z, 3.0);
}
