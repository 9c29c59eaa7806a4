//! Unit curves from `(0, 0)` to `(1, 1)` bulging toward `(0, 1)`.

use std::f64::consts::{FRAC_PI_2, PI};

use config::constants::CHAMFER_POINTEDNESS_THRESHOLD;

use crate::core::vec2::{lerp, uv};
use crate::core::V2;

/// Quarter circle blended with its chord.
///
/// `pointedness` 1 is the true circle, anything below the chamfer threshold
/// keeps only the two endpoints.
pub fn unit_arc(divisions: u32, pointedness: f64) -> Vec<V2> {
    if pointedness < CHAMFER_POINTEDNESS_THRESHOLD {
        return vec![uv(0.0, 0.0), uv(1.0, 1.0)];
    }
    let blend = pointedness.min(1.0);
    let steps = divisions.max(1);
    (0..=steps)
        .map(|k| {
            let t = k as f64 / steps as f64;
            let angle = PI - t * FRAC_PI_2;
            let circle = uv(1.0 + angle.cos(), angle.sin());
            lerp(uv(t, t), circle, blend)
        })
        .collect()
}

/// Arc of a circle wider than the unit square, normalized so it ends at
/// `(1, 1)` meeting the centerline at an angle.
///
/// `pointedness` 0 gives the quarter circle.
pub fn unit_gothic(divisions: u32, pointedness: f64) -> Vec<V2> {
    let radius = 1.0 + 3.0 * pointedness.clamp(0.0, 1.0);
    let end = ((1.0 - radius) / radius).acos();
    let height = (2.0 * radius - 1.0).sqrt();
    let steps = divisions.max(1);
    (0..=steps)
        .map(|k| {
            let angle = PI - (PI - end) * k as f64 / steps as f64;
            uv(radius + radius * angle.cos(), radius * angle.sin() / height)
        })
        .collect()
}
