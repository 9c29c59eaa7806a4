//! # Selectors
//!
//! The enum-valued fields whose decoded values decide which other fields
//! exist. Integer codes are version specific: version 0 knows a subset of
//! the categories, in its own order.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::range::DataValue;
use crate::tree::{DataTree, FieldPath};

/// Extrusion profile family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtrusionCategory {
    Square,
    Arc,
    Ellipse,
    Gothic,
    Nested,
}

/// Footprint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FootprintCategory {
    Square,
    SquareGrid,
    TriangleGrid,
    HexGrid,
    Cylinder,
    MalculmiusOne,
}

/// Processing method for heights, twist and skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodCategory {
    None,
    Incremental,
    Sin,
}

/// Categories that can be addressed by an integer code in a schema.
pub trait Category: Copy + PartialEq + Sized + 'static {
    /// Field path of the selector leaf.
    const PATH: &'static str;

    /// Categories in code order for `version`.
    fn available(version: u32) -> &'static [Self];

    /// Code of `self` in `version`.
    fn code(self, version: u32) -> Option<i64> {
        Self::available(version)
            .iter()
            .position(|c| *c == self)
            .map(|p| p as i64)
    }

    /// Category for `code` in `version`.
    fn from_code(code: i64, version: u32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::available(version).get(i).copied())
    }
}

impl Category for ExtrusionCategory {
    const PATH: &'static str = "extrusion.type";

    fn available(version: u32) -> &'static [Self] {
        use ExtrusionCategory::*;
        match version {
            0 => &[Square, Arc, Ellipse],
            _ => &[Square, Arc, Ellipse, Gothic, Nested],
        }
    }
}

impl Category for FootprintCategory {
    const PATH: &'static str = "footprint.type";

    fn available(version: u32) -> &'static [Self] {
        use FootprintCategory::*;
        match version {
            0 => &[Square, SquareGrid, Cylinder],
            _ => &[Square, SquareGrid, TriangleGrid, HexGrid, Cylinder, MalculmiusOne],
        }
    }
}

impl Category for MethodCategory {
    const PATH: &'static str = "heights.method";

    fn available(_version: u32) -> &'static [Self] {
        &[MethodCategory::None, MethodCategory::Incremental, MethodCategory::Sin]
    }
}

/// Path of the twist method selector (version 1 and later).
pub const TWIST_METHOD_PATH: &str = "twist.method";
/// Path of the skew method selector (version 1 and later).
pub const SKEW_METHOD_PATH: &str = "skew.method";

/// The decoded selector chain of one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    pub extrusion: ExtrusionCategory,
    pub footprint: FootprintCategory,
    pub heights: MethodCategory,
    pub twist: MethodCategory,
    pub skew: MethodCategory,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            extrusion: ExtrusionCategory::Arc,
            footprint: FootprintCategory::Cylinder,
            heights: MethodCategory::None,
            twist: MethodCategory::None,
            skew: MethodCategory::None,
        }
    }
}

impl Selectors {
    /// Reads the selector chain from a tree of `version`.
    ///
    /// Selectors missing from the tree (twist and skew in version 0) read as
    /// [`MethodCategory::None`].
    pub fn from_tree(tree: &DataTree, version: u32) -> CodecResult<Self> {
        Ok(Self {
            extrusion: read(tree, ExtrusionCategory::PATH, version)?
                .unwrap_or(ExtrusionCategory::Arc),
            footprint: read(tree, FootprintCategory::PATH, version)?
                .unwrap_or(FootprintCategory::Cylinder),
            heights: read(tree, MethodCategory::PATH, version)?.unwrap_or(MethodCategory::None),
            twist: read(tree, TWIST_METHOD_PATH, version)?.unwrap_or(MethodCategory::None),
            skew: read(tree, SKEW_METHOD_PATH, version)?.unwrap_or(MethodCategory::None),
        })
    }
}

/// Code of `category` in `version`, or an [`CodecError::UnknownSelector`].
pub(crate) fn code_for<C: Category>(category: C, selector: &'static str, version: u32) -> CodecResult<i64> {
    category.code(version).ok_or(CodecError::UnknownSelector {
        selector,
        code: category.code(super::LATEST_VERSION).unwrap_or(-1),
        version,
    })
}

fn read<C: Category>(tree: &DataTree, path: &'static str, version: u32) -> CodecResult<Option<C>> {
    let Some(value) = tree.value(&FieldPath::from(path)) else {
        return Ok(None);
    };
    let DataValue::Int(code) = value else {
        return Err(CodecError::ValueMismatch {
            field: path.to_string(),
        });
    };
    C::from_code(*code, version)
        .map(Some)
        .ok_or(CodecError::UnknownSelector {
            selector: path,
            code: *code,
            version,
        })
}
