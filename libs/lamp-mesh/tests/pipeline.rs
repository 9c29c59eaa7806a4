//! URL to mesh, end to end.

use std::collections::BTreeSet;

use approx::assert_relative_eq;
use lamp_codec::{encode, get_default_object, update_data_entry, DataTree, DataValue, FieldPath};
use lamp_mesh::half_edge::HalfEdgeMesh;
use lamp_mesh::{render_url, GeometryBaseData, Mesh, VoxelState};

fn with(tree: &DataTree, path: &str, value: DataValue) -> DataTree {
    update_data_entry(tree, &FieldPath::from(path), value).unwrap()
}

fn render(tree: &DataTree) -> Mesh {
    render_url(&encode(tree).unwrap()).unwrap()
}

fn assert_well_formed(mesh: &Mesh) {
    assert!(mesh.face_count() > 0);
    let count = mesh.vertex_count() as u32;
    assert!(mesh.faces().iter().all(|f| f.len() >= 3 && f.iter().all(|i| *i < count)));
    assert_eq!(mesh.face_data().map(<[_]>::len), Some(mesh.face_count()));
}

#[test]
fn every_footprint_family_renders() {
    let base = get_default_object(1).unwrap();
    for code in 0..6 {
        let tree = with(&base, "footprint.type", DataValue::Int(code));
        let mesh = render(&tree);
        assert_well_formed(&mesh);
    }
}

#[test]
fn every_profile_renders() {
    let base = get_default_object(1).unwrap();
    for code in 0..5 {
        let tree = with(&base, "extrusion.type", DataValue::Int(code));
        assert_well_formed(&render(&tree));
    }
}

#[test]
fn every_combination_has_only_proper_faces() {
    let base = get_default_object(1).unwrap();
    for footprint in 0..6 {
        let tree = with(&base, "footprint.type", DataValue::Int(footprint));
        for profile in 0..5 {
            let tree = with(&tree, "extrusion.type", DataValue::Int(profile));
            let mesh = render(&tree);
            assert!(mesh.validate(), "footprint {footprint}, profile {profile}");
        }
    }
}

#[test]
fn version_zero_urls_render() {
    let base = get_default_object(0).unwrap();
    for code in 0..3 {
        let tree = with(&base, "footprint.type", DataValue::Int(code));
        assert_well_formed(&render(&tree));
    }
}

#[test]
fn story_count_sets_height() {
    let base = get_default_object(1).unwrap();
    let tree = with(&base, "heights.storyCount", DataValue::Int(2));
    let tree = with(&tree, "heights.height", DataValue::Float(25.0));
    let (min, max) = render(&tree).bounding_box();
    assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
    assert_relative_eq!(max.z, 50.0, epsilon = 1e-9);
}

#[test]
fn relative_heights_reach_total() {
    let base = get_default_object(1).unwrap();
    // Incremental stories, rescaled to the height field
    let tree = with(&base, "heights.method", DataValue::Int(1));
    let tree = with(&tree, "heights.relative", DataValue::Boolean(true));
    let tree = with(&tree, "heights.height", DataValue::Float(120.0));
    let (_, max) = render(&tree).bounding_box();
    assert_relative_eq!(max.z, 120.0, epsilon = 1e-6);
}

#[test]
fn twist_rotates_upper_stories() {
    let base = get_default_object(1).unwrap();
    // Square footprint, so the rotation shows in the bounds
    let square = with(&base, "footprint.type", DataValue::Int(0));
    let twisted = with(&square, "twist.method", DataValue::Int(1));
    let twisted = with(&twisted, "twist.angle", DataValue::Float(20.0));

    let (plain_min, plain_max) = render(&square).bounding_box();
    let (twisted_min, twisted_max) = render(&twisted).bounding_box();
    assert_relative_eq!(plain_max.x, 30.0, epsilon = 1e-9);
    assert!(twisted_max.x > plain_max.x + 1.0);
    assert!(twisted_min.x < plain_min.x - 1.0);
}

#[test]
fn hollow_cores_are_not_meshed() {
    let base = get_default_object(1).unwrap();
    let tree = with(&base, "footprint.innerRadius", DataValue::Float(0.0));
    let mesh = render(&tree);
    assert_well_formed(&mesh);
    let data = mesh.face_data().unwrap();
    assert!(data.iter().all(|m| m.voxel_state != Some(VoxelState::None)));
}

#[test]
fn every_voxel_contributes() {
    let tree = get_default_object(1).unwrap();
    let data = GeometryBaseData::try_from(&tree).unwrap();
    let mesh = lamp_mesh::build_lamp_mesh(&data).unwrap();
    let voxels: BTreeSet<_> = mesh
        .face_data()
        .unwrap()
        .iter()
        .filter_map(|m| m.origin_voxel)
        .collect();
    // 12 segments, one ring, 4 stories
    assert_eq!(voxels.len(), 48);

    let he = HalfEdgeMesh::from_mesh(&mesh);
    assert!(he.validate().is_ok());
}
