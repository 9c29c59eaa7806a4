//! Closing meshes between a face outline and an inner rim.

use config::constants::EPSILON;

use crate::core::vec3::polygon_area;
use crate::core::{VertexKey, V3};
use crate::mesh::{FaceMetaData, Mesh};

/// Cumulative perimeter fractions of a closed loop, one per vertex plus
/// the closing 1.0.
fn perimeter_fractions(loop_: &[V3]) -> Vec<f64> {
    let n = loop_.len();
    let mut fractions = Vec::with_capacity(n + 1);
    let mut length = 0.0;
    fractions.push(0.0);
    for i in 0..n {
        length += loop_[i].distance(loop_[(i + 1) % n]);
        fractions.push(length);
    }
    if length > 0.0 {
        fractions.iter_mut().for_each(|f| *f /= length);
    } else {
        // Zero-length loops advance evenly
        fractions = (0..=n).map(|i| i as f64 / n.max(1) as f64).collect();
    }
    fractions
}

/// Three distinct keys spanning a non-zero area.
fn proper(triangle: &[V3; 3]) -> bool {
    let [a, b, c] = triangle.map(VertexKey::from);
    a != b && b != c && a != c && polygon_area(triangle) > EPSILON
}

/// Frame between an outer loop and an inner loop running the same way
/// around, starting at corresponding points.
///
/// The two loops are zipped by perimeter fraction into triangles that keep
/// the outer loop's orientation. Triangles that collapse onto a line, as
/// where a rim point sits on the outline, are left out. An inner loop with fewer than three points
/// closes the outer loop with a single cap polygon instead.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use lamp_mesh::mesh::FaceMetaData;
/// use lamp_mesh::voxel_mesh::get_closing_mesh;
///
/// let outer = [DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0), DVec3::new(4.0, 4.0, 0.0), DVec3::new(0.0, 4.0, 0.0)];
/// let inner = [DVec3::new(1.0, 1.0, 0.0), DVec3::new(3.0, 1.0, 0.0), DVec3::new(3.0, 3.0, 0.0), DVec3::new(1.0, 3.0, 0.0)];
/// let frame = get_closing_mesh(&outer, &inner, FaceMetaData::default());
/// assert_eq!(frame.face_count(), 8);
/// ```
pub fn get_closing_mesh(outer: &[V3], inner: &[V3], meta: FaceMetaData) -> Mesh {
    let mut mesh = Mesh::new();
    if outer.len() < 3 {
        return mesh;
    }
    if inner.len() < 3 {
        mesh.add_polygon(outer, meta);
        return mesh;
    }

    let (no, ni) = (outer.len(), inner.len());
    let (fo, fi) = (perimeter_fractions(outer), perimeter_fractions(inner));
    let (mut i, mut j) = (0, 0);
    while i < no || j < ni {
        let advance_outer = j == ni || (i < no && fo[i + 1] <= fi[j + 1]);
        let triangle = if advance_outer {
            let t = [outer[i % no], outer[(i + 1) % no], inner[j % ni]];
            i += 1;
            t
        } else {
            let t = [outer[i % no], inner[(j + 1) % ni], inner[j % ni]];
            j += 1;
            t
        };
        if proper(&triangle) {
            mesh.add_polygon(&triangle, meta);
        }
    }
    mesh
}
