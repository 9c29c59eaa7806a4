//! Square, triangle and hexagon tilings.
//!
//! Every grid is centered on the origin. Cells are addressed by column `i`
//! and row `j`, which is also what the shell predicate looks at.

use crate::core::V2;
use crate::error::MeshResult;
use crate::mesh::Mesh;

use super::{require, FootprintBuilder};

/// Size, cell counts and optional shell band of a grid footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParameters {
    /// Cell size (side length, or flat-to-flat width for hexagons)
    pub size: f64,
    /// Cells per row
    pub x_count: u32,
    /// Rows
    pub y_count: u32,
    /// Band thickness in cells; `None` fills the grid
    pub shell: Option<u32>,
}

impl GridParameters {
    /// A filled grid.
    pub fn new(size: f64, x_count: u32, y_count: u32) -> Self {
        Self {
            size,
            x_count,
            y_count,
            shell: None,
        }
    }

    /// The same grid restricted to a band of `thickness` cells.
    pub fn with_shell(mut self, thickness: u32) -> Self {
        self.shell = Some(thickness);
        self
    }

    fn validate(&self) -> MeshResult<()> {
        require(self.x_count >= 1 && self.y_count >= 1, || {
            format!("grid counts must be at least 1, got {}×{}", self.x_count, self.y_count)
        })?;
        require(self.size > 0.0, || format!("grid size must be positive, got {}", self.size))?;
        if let Some(thickness) = self.shell {
            require(thickness >= 1, || "shell thickness must be at least 1".to_string())?;
        }
        Ok(())
    }

    /// Whether cell `(i, j)` belongs to the footprint.
    pub fn should_be_rendered(&self, i: u32, j: u32) -> bool {
        match self.shell {
            None => true,
            Some(t) => {
                i < t || j < t || i + t >= self.x_count || j + t >= self.y_count
            }
        }
    }
}

pub(super) fn square_grid(params: &GridParameters) -> MeshResult<Mesh> {
    params.validate()?;
    let size = params.size;
    let origin = V2::new(
        -(params.x_count as f64) * size * 0.5,
        -(params.y_count as f64) * size * 0.5,
    );
    let corner = |i: u32, j: u32| origin + V2::new(i as f64 * size, j as f64 * size);

    let mut builder = FootprintBuilder::new();
    for j in 0..params.y_count {
        for i in 0..params.x_count {
            if !params.should_be_rendered(i, j) {
                continue;
            }
            builder.polygon(
                &[corner(i, j), corner(i + 1, j), corner(i + 1, j + 1), corner(i, j + 1)],
                None,
            )?;
        }
    }
    Ok(builder.finish())
}

pub(super) fn triangle_grid(params: &GridParameters) -> MeshResult<Mesh> {
    params.validate()?;
    let size = params.size;
    let row_height = size * 3f64.sqrt() * 0.5;
    let origin = V2::new(
        -(params.x_count as f64 + 0.5) * size * 0.5,
        -(params.y_count as f64) * row_height * 0.5,
    );
    // Odd vertex rows shift half a cell to the right
    let vertex = |i: u32, row: u32| {
        let shift = if row % 2 == 1 { 0.5 } else { 0.0 };
        origin + V2::new((i as f64 + shift) * size, row as f64 * row_height)
    };

    let mut builder = FootprintBuilder::new();
    for j in 0..params.y_count {
        for i in 0..params.x_count {
            if !params.should_be_rendered(i, j) {
                continue;
            }
            let (b0, b1) = (vertex(i, j), vertex(i + 1, j));
            let (t0, t1) = (vertex(i, j + 1), vertex(i + 1, j + 1));
            if j % 2 == 0 {
                builder.polygon(&[b0, b1, t0], None)?;
                builder.polygon(&[b1, t1, t0], None)?;
            } else {
                builder.polygon(&[b0, t1, t0], None)?;
                builder.polygon(&[b0, b1, t1], None)?;
            }
        }
    }
    Ok(builder.finish())
}

pub(super) fn hex_grid(params: &GridParameters) -> MeshResult<Mesh> {
    params.validate()?;
    let width = params.size;
    let radius = width / 3f64.sqrt();
    let row_step = radius * 1.5;
    let origin = V2::new(
        -(params.x_count as f64 - 0.5) * width * 0.5,
        -(params.y_count as f64 - 1.0) * row_step * 0.5,
    );

    let mut builder = FootprintBuilder::new();
    for j in 0..params.y_count {
        for i in 0..params.x_count {
            if !params.should_be_rendered(i, j) {
                continue;
            }
            let shift = if j % 2 == 1 { 0.5 } else { 0.0 };
            let center = origin + V2::new((i as f64 + shift) * width, j as f64 * row_step);
            let corners: Vec<V2> = (0..6)
                .map(|k| {
                    let angle = std::f64::consts::FRAC_PI_6 + k as f64 * std::f64::consts::FRAC_PI_3;
                    crate::core::vec2::polar(center, radius, angle)
                })
                .collect();
            builder.polygon(&corners, None)?;
        }
    }
    Ok(builder.finish())
}
