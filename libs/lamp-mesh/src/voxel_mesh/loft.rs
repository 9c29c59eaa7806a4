//! Inset columns, profile placement and face accumulation.

use config::constants::{
    EPSILON, MAXIMUM_INSET_FRACTION, MINIMUM_HORIZONTAL_COVERING, MINIMUM_VERTICAL_COVERING,
};

use crate::core::vec3::polygon_area;
use crate::core::{VertexKey, V2, V3};
use crate::mesh::{FaceMetaData, Mesh};
use crate::profile::{curve_for_quad, ExtrusionParameters};

/// Inset distance for a span: at least the covering, at most the maximum
/// fraction of the span.
pub fn inset_distance(fraction: f64, span: f64, minimum: f64) -> f64 {
    (fraction * span).max(minimum).min(MAXIMUM_INSET_FRACTION * span)
}

/// A vertical segment of the voxel, bottom and top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Column {
    pub bottom: V3,
    pub top: V3,
}

impl Column {
    pub fn new(bottom: V3, top: V3) -> Self {
        Self { bottom, top }
    }

    pub fn midpoint(a: Column, b: Column) -> Self {
        Self {
            bottom: (a.bottom + b.bottom) * 0.5,
            top: (a.top + b.top) * 0.5,
        }
    }

    /// Moves both ends toward `center` by their horizontal inset.
    fn inset_toward(self, center: Column, fraction: f64) -> Self {
        let shift = |from: V3, to: V3| {
            let span = from.distance(to);
            from + (to - from).normalize_or_zero() * inset_distance(fraction, span, MINIMUM_HORIZONTAL_COVERING)
        };
        Self {
            bottom: shift(self.bottom, center.bottom),
            top: shift(self.top, center.top),
        }
    }

    /// Pulls floor and ceiling in by their vertical insets.
    fn inset_vertically(self, extrusion: &ExtrusionParameters) -> Self {
        let height = self.bottom.distance(self.top);
        if height < EPSILON {
            return self;
        }
        let floor = inset_distance(extrusion.inset_bottom, height, MINIMUM_VERTICAL_COVERING);
        let ceiling = inset_distance(extrusion.inset_top, height, MINIMUM_VERTICAL_COVERING);
        Self {
            bottom: self.bottom.lerp(self.top, floor / height),
            top: self.top.lerp(self.bottom, ceiling / height),
        }
    }
}

/// Profile curve placed between an outer column and the centerline.
///
/// Vertical insets always apply; the horizontal inset only when
/// `horizontal` is set.
pub(crate) fn place_curve(
    curve: &[V2],
    outer: Column,
    center: Column,
    horizontal: bool,
    extrusion: &ExtrusionParameters,
) -> Vec<V3> {
    let outer = if horizontal {
        outer.inset_toward(center, extrusion.inset_sides)
    } else {
        outer
    };
    let outer = outer.inset_vertically(extrusion);
    let center = center.inset_vertically(extrusion);
    curve_for_quad(curve, &[outer.bottom, center.bottom, outer.top, center.top])
}

/// Collects the faces of one voxel under a shared metadata tag.
pub(crate) struct WallSink {
    mesh: Mesh,
    meta: FaceMetaData,
}

impl WallSink {
    pub fn new(meta: FaceMetaData) -> Self {
        Self {
            mesh: Mesh::new(),
            meta,
        }
    }

    pub fn meta(&self) -> FaceMetaData {
        self.meta
    }

    /// Adds a polygon, collapsing repeated points; slivers and polygons
    /// without area are dropped.
    pub fn polygon(&mut self, points: &[V3]) {
        let mut kept: Vec<V3> = Vec::with_capacity(points.len());
        for p in points {
            if kept.last().map_or(true, |q| VertexKey::from(*q) != VertexKey::from(*p)) {
                kept.push(*p);
            }
        }
        while kept.len() > 1 && kept.first().map(|p| VertexKey::from(*p)) == kept.last().map(|p| VertexKey::from(*p)) {
            kept.pop();
        }
        if kept.len() >= 3 && polygon_area(&kept) > EPSILON {
            self.mesh.add_polygon(&kept, self.meta);
        }
    }

    /// Ruled strip between two curves of equal length.
    pub fn loft(&mut self, from: &[V3], to: &[V3]) {
        for j in 0..from.len().min(to.len()).saturating_sub(1) {
            self.polygon(&[from[j], to[j], to[j + 1], from[j + 1]]);
        }
    }

    pub fn merge(&mut self, other: &Mesh) {
        self.mesh.merge(other);
    }

    pub fn finish(self) -> Mesh {
        self.mesh
    }
}
