//! # Parameter Tree to Mesh
//!
//! Maps a decoded [`DataTree`] onto typed geometry parameters and runs the
//! full pipeline.
//!
//! ```text
//! URL ──decode──▶ DataTree ──try_from──▶ GeometryBaseData ──build──▶ Mesh
//! ```
//!
//! Fields a version does not carry (ring growth, twist and skew in version
//! 0) fall back to their neutral values. Angles are stored in degrees; the
//! sinusoid phase is converted to radians here.

use lamp_codec::range::DataValue;
use lamp_codec::schema::tree_version;
use lamp_codec::{
    decode, DataTree, ExtrusionCategory, FieldPath, FootprintCategory, MethodCategory, Selectors,
};

use config::constants::DEFAULT_PROFILE_DIVISIONS;

use crate::error::{MeshError, MeshResult};
use crate::footprint::{CylinderParameters, FootprintParameters, GridParameters, MalculmiusParameters};
use crate::heights::{HeightGenerator, ProcessingMethod};
use crate::mesh::Mesh;
use crate::profile::{ExtrusionParameters, ExtrusionProfile};
use crate::voxel::get_voxel_complex_from_geometry_base_data;
use crate::voxel_mesh::get_mesh_for_complex;

/// Everything needed to build one lamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryBaseData {
    /// Cross-section
    pub footprint: FootprintParameters,
    /// Wall profile and insets
    pub extrusion: ExtrusionParameters,
    /// Story schedule
    pub heights: HeightGenerator,
    /// Rotation per story, degrees
    pub twist: ProcessingMethod,
    /// Lean per story, degrees
    pub skew: ProcessingMethod,
}

impl TryFrom<&DataTree> for GeometryBaseData {
    type Error = MeshError;

    fn try_from(tree: &DataTree) -> MeshResult<Self> {
        let version = tree_version(tree)?;
        let selectors = Selectors::from_tree(tree, version)?;
        let fields = Fields { tree };

        Ok(Self {
            footprint: fields.footprint(selectors.footprint)?,
            extrusion: fields.extrusion(selectors.extrusion)?,
            heights: fields.heights(selectors.heights)?,
            twist: fields.method("twist", selectors.twist)?,
            skew: fields.method("skew", selectors.skew)?,
        })
    }
}

/// Builds the lamp mesh for a parameter set.
///
/// # Errors
///
/// Propagates footprint validation and sweep errors.
pub fn build_lamp_mesh(data: &GeometryBaseData) -> MeshResult<Mesh> {
    let complex = get_voxel_complex_from_geometry_base_data(data)?;
    let mesh = get_mesh_for_complex(&complex, &data.extrusion);
    tracing::info!(
        voxels = complex.voxel_count(),
        faces = mesh.face_count(),
        "lamp mesh built"
    );
    Ok(mesh)
}

/// Decodes a URL string and builds its lamp.
///
/// # Examples
/// ```
/// use lamp_codec::{encode, get_default_object};
/// use lamp_mesh::from_params::render_url;
///
/// let url = encode(&get_default_object(1).unwrap()).unwrap();
/// let mesh = render_url(&url).unwrap();
/// assert!(mesh.face_count() > 0);
/// ```
///
/// # Errors
///
/// Returns [`MeshError::Codec`] for undecodable strings and propagates
/// geometry errors.
pub fn render_url(url: &str) -> MeshResult<Mesh> {
    let tree = decode(url)?;
    build_lamp_mesh(&GeometryBaseData::try_from(&tree)?)
}

// =============================================================================
// FIELD READERS
// =============================================================================

struct Fields<'a> {
    tree: &'a DataTree,
}

impl Fields<'_> {
    fn value(&self, path: &str) -> Option<&DataValue> {
        self.tree.value(&FieldPath::from(path))
    }

    fn float(&self, path: &str) -> MeshResult<f64> {
        self.value(path)
            .and_then(DataValue::as_float)
            .ok_or_else(|| MeshError::MissingParameter(path.to_string()))
    }

    fn float_or(&self, path: &str, fallback: f64) -> f64 {
        self.value(path).and_then(DataValue::as_float).unwrap_or(fallback)
    }

    fn count(&self, path: &str) -> MeshResult<u32> {
        let value = self
            .value(path)
            .and_then(DataValue::as_int)
            .ok_or_else(|| MeshError::MissingParameter(path.to_string()))?;
        u32::try_from(value).map_err(|_| MeshError::invalid_parameter(format!("{path} = {value} is not a count")))
    }

    fn count_or(&self, path: &str, fallback: u32) -> MeshResult<u32> {
        match self.value(path) {
            Some(_) => self.count(path),
            None => Ok(fallback),
        }
    }

    fn flag(&self, path: &str) -> bool {
        self.value(path).and_then(DataValue::as_bool).unwrap_or(false)
    }

    fn footprint(&self, category: FootprintCategory) -> MeshResult<FootprintParameters> {
        Ok(match category {
            FootprintCategory::Square => FootprintParameters::Square {
                size: self.float("footprint.size")?,
            },
            FootprintCategory::SquareGrid => FootprintParameters::SquareGrid(self.grid()?),
            FootprintCategory::TriangleGrid => FootprintParameters::TriangleGrid(self.grid()?),
            FootprintCategory::HexGrid => FootprintParameters::HexGrid(self.grid()?),
            FootprintCategory::Cylinder => FootprintParameters::Cylinder(CylinderParameters {
                segments: self.count("footprint.segments")?,
                rings: self.count_or("footprint.rings", 1)?,
                inner_radius: self.float("footprint.innerRadius")?,
                ring_width: self.float("footprint.ringWidth")?,
                ring_growth: self.float_or("footprint.ringGrowth", 1.0),
                rotation: self.float_or("footprint.rotation", 0.0),
            }),
            FootprintCategory::MalculmiusOne => FootprintParameters::MalculmiusOne(MalculmiusParameters {
                lobe_count: self.count("footprint.lobeCount")?,
                circle_radius: self.float("footprint.circleRadius")?,
                lobe_radius: self.float("footprint.lobeRadius")?,
                lobe_divisions: self.count("footprint.lobeDivisions")?,
                offset: self.float("footprint.offset")?,
                angle_split: self.float("footprint.angleSplit")?,
            }),
        })
    }

    fn grid(&self) -> MeshResult<GridParameters> {
        let grid = GridParameters::new(
            self.float("footprint.size")?,
            self.count("footprint.xCount")?,
            self.count("footprint.yCount")?,
        );
        if self.flag("footprint.shell") {
            Ok(grid.with_shell(self.count_or("footprint.shellThickness", 1)?))
        } else {
            Ok(grid)
        }
    }

    fn extrusion(&self, category: ExtrusionCategory) -> MeshResult<ExtrusionParameters> {
        let radius_top = || self.float("extrusion.radiusTop");
        let profile = match category {
            ExtrusionCategory::Square => ExtrusionProfile::Square,
            ExtrusionCategory::Arc => ExtrusionProfile::Arc {
                radius_top: radius_top()?,
            },
            ExtrusionCategory::Ellipse => ExtrusionProfile::Ellipse {
                radius_top: radius_top()?,
            },
            ExtrusionCategory::Gothic => ExtrusionProfile::Gothic {
                radius_top: radius_top()?,
                pointedness: self.float("extrusion.pointedness")?,
            },
            ExtrusionCategory::Nested => ExtrusionProfile::Nested {
                radius_top: radius_top()?,
                division_count: self.count("extrusion.divisionCount")?,
                division_resolution: self.count("extrusion.divisionResolution")?,
                division_pointedness: self.float("extrusion.divisionPointedness")?,
            },
        };
        Ok(ExtrusionParameters {
            profile,
            inset_top: self.float("extrusion.insetTop")?,
            inset_bottom: self.float("extrusion.insetBottom")?,
            inset_sides: self.float("extrusion.insetSides")?,
            divisions: self.count_or("extrusion.resolution", DEFAULT_PROFILE_DIVISIONS)?,
        })
    }

    fn heights(&self, method: MethodCategory) -> MeshResult<HeightGenerator> {
        let story_count = self.count("heights.storyCount")?;
        let height = self.float("heights.height")?;
        let method = self.method("heights", method)?;
        if self.flag("heights.relative") {
            Ok(HeightGenerator::relative(story_count, height, method))
        } else {
            Ok(HeightGenerator::absolute(story_count, height, method))
        }
    }

    fn method(&self, branch: &str, category: MethodCategory) -> MeshResult<ProcessingMethod> {
        let path = |leaf: &str| format!("{branch}.{leaf}");
        Ok(match category {
            MethodCategory::None => ProcessingMethod::None,
            MethodCategory::Incremental => ProcessingMethod::Incremental {
                angle: self.float(&path("angle"))?,
                total: self.value(&path("total")).and_then(DataValue::as_float),
            },
            MethodCategory::Sin => ProcessingMethod::Sin {
                min: self.float(&path("min"))?,
                max: self.float(&path("max"))?,
                period: self.float(&path("period"))?,
                phase_shift: self.float(&path("phaseShift"))?.to_radians(),
            },
        })
    }
}
