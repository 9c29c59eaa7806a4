//! Oriented frames the footprint is placed into.

use glam::DMat4;

use crate::core::V3;
use crate::heights::ProcessingMethod;

/// Origin and orthonormal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Position of the footprint origin
    pub origin: V3,
    /// Image of the footprint x axis
    pub x_axis: V3,
    /// Image of the footprint y axis
    pub y_axis: V3,
    /// Image of the footprint z axis
    pub z_axis: V3,
}

impl Default for Frame {
    fn default() -> Self {
        Self::at(V3::ZERO)
    }
}

impl Frame {
    /// World-aligned frame at `origin`.
    pub fn at(origin: V3) -> Self {
        Self {
            origin,
            x_axis: V3::X,
            y_axis: V3::Y,
            z_axis: V3::Z,
        }
    }

    /// Frame at `origin` rotated about z by `angle` radians.
    pub fn rotated(origin: V3, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            origin,
            x_axis: V3::new(cos, sin, 0.0),
            y_axis: V3::new(-sin, cos, 0.0),
            z_axis: V3::Z,
        }
    }

    /// Matrix with the axes and origin as columns.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_cols(
            self.x_axis.extend(0.0),
            self.y_axis.extend(0.0),
            self.z_axis.extend(0.0),
            self.origin.extend(1.0),
        )
    }

    /// Maps a footprint point into the frame.
    pub fn transform_point(&self, point: V3) -> V3 {
        self.to_matrix().transform_point3(point)
    }
}

/// Frame stack for a height list.
///
/// Frame `i` sits at `z = heights[i]`, turned by the twist angle of story
/// `i` (degrees) and pushed along x by the accumulated
/// `story height · tan(skew)` of the stories below it.
///
/// # Examples
/// ```
/// use lamp_mesh::heights::ProcessingMethod;
/// use lamp_mesh::voxel::frames_from_heights;
///
/// let frames = frames_from_heights(&[0.0, 10.0, 20.0], &ProcessingMethod::None, &ProcessingMethod::None);
/// assert_eq!(frames.len(), 3);
/// assert_eq!(frames[2].origin.z, 20.0);
/// ```
pub fn frames_from_heights(heights: &[f64], twist: &ProcessingMethod, skew: &ProcessingMethod) -> Vec<Frame> {
    let mut offset = 0.0;
    heights
        .iter()
        .enumerate()
        .map(|(i, z)| {
            if i > 0 {
                let story = z - heights[i - 1];
                offset += story * skew.angle_at(i - 1).to_radians().tan();
            }
            Frame::rotated(V3::new(offset, 0.0, *z), twist.angle_at(i).to_radians())
        })
        .collect()
}
