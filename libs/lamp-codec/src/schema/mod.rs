//! # Versioned Schema Engine
//!
//! Produces the parameter tree for a version and selector chain, and drives
//! the two-phase decode: read the version, read the selectors with the
//! top-level pattern, then read everything with the full pattern.
//!
//! ## Field Order
//!
//! The top-level fields (version and selectors) are always indices `0..k` of
//! the full tree of the same version, so the top-level pattern is a prefix
//! of every full pattern.
//!
//! ```text
//! v1: version | extrusion.type | footprint.type | heights.method | twist.method | skew.method | ...
//! v0: version | extrusion.type | footprint.type | heights.method | ...
//! ```
//!
//! ## Integrity
//!
//! URLs carry no checksum. A corrupted string decodes to whatever values
//! its bits spell (integers wrap inside their span), so callers that need
//! integrity must validate decoded ranges themselves.

mod builder;
pub mod selectors;
mod v0;
mod v1;

#[cfg(test)]
mod tests;

use config::constants::{BITS_PER_SYMBOL, VERSION_BITS};

use crate::bits::parse_base64_to_bits;
use crate::error::{CodecError, CodecResult};
use crate::pattern::create_url;
use crate::range::DataValue;
use crate::tree::{DataTree, FieldPath};

use builder::SchemaBuilder;
pub use selectors::{Category, ExtrusionCategory, FootprintCategory, MethodCategory, Selectors};

/// Most recent schema version.
pub const LATEST_VERSION: u32 = 1;

/// Versions with a registered schema.
pub const SUPPORTED_VERSIONS: &[u32] = &[0, 1];

/// Path of the version leaf.
pub const VERSION_PATH: &str = "version";

// =============================================================================
// RESOLUTION
// =============================================================================

/// Builds the selector-only tree of `version` with default selector values.
///
/// # Errors
///
/// Returns [`CodecError::VersionNotFound`] for unregistered versions.
///
/// # Example
///
/// ```rust
/// use lamp_codec::schema::resolve_top_level;
///
/// let tree = resolve_top_level(1).unwrap();
/// assert_eq!(tree.flatten().len(), 6);
/// assert!(resolve_top_level(7).is_err());
/// ```
pub fn resolve_top_level(version: u32) -> CodecResult<DataTree> {
    let mut builder = SchemaBuilder::new();
    let selectors = Selectors::default();
    match version {
        v0::VERSION => v0::top_level(&mut builder, &selectors)?,
        v1::VERSION => v1::top_level(&mut builder, &selectors)?,
        other => return Err(CodecError::VersionNotFound(other)),
    }
    Ok(builder.finish())
}

/// Builds the complete tree of `version` for one selector chain, every leaf
/// holding its default value.
///
/// # Errors
///
/// - [`CodecError::VersionNotFound`] for unregistered versions
/// - [`CodecError::UnknownSelector`] if a selector has no code in `version`
pub fn resolve_full(version: u32, selectors: &Selectors) -> CodecResult<DataTree> {
    let mut builder = SchemaBuilder::new();
    match version {
        v0::VERSION => v0::full(&mut builder, selectors)?,
        v1::VERSION => v1::full(&mut builder, selectors)?,
        other => return Err(CodecError::VersionNotFound(other)),
    }
    Ok(builder.finish())
}

/// The default tree of `version`: Arc profile, Cylinder footprint, no
/// processing methods.
pub fn get_default_object(version: u32) -> CodecResult<DataTree> {
    resolve_full(version, &Selectors::default())
}

/// Reads the version leaf of a tree.
pub fn tree_version(tree: &DataTree) -> CodecResult<u32> {
    tree.value(&FieldPath::from(VERSION_PATH))
        .and_then(DataValue::as_version)
        .ok_or_else(|| CodecError::PathNotFound(VERSION_PATH.to_string()))
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encodes a tree into its URL string.
///
/// # Example
///
/// ```rust
/// use lamp_codec::schema::{decode, encode, get_default_object};
///
/// let tree = get_default_object(1).unwrap();
/// let url = encode(&tree).unwrap();
/// assert_eq!(decode(&url).unwrap().values().len(), tree.values().len());
/// ```
pub fn encode(tree: &DataTree) -> CodecResult<String> {
    create_url(&tree.values(), &tree.pattern())
}

/// Decodes a URL string into a fresh tree.
///
/// # Errors
///
/// - [`CodecError::InvalidCharacter`] for symbols outside the alphabet
/// - [`CodecError::UrlTooShort`] if the string ends inside a field
/// - [`CodecError::VersionNotFound`] for unregistered versions
/// - [`CodecError::UrlLengthMismatch`] if a whole symbol is left over
pub fn decode(url: &str) -> CodecResult<DataTree> {
    let bits = parse_base64_to_bits(url)?;
    let version = bits
        .read_uint(0, VERSION_BITS)
        .ok_or(CodecError::UrlTooShort {
            needed: VERSION_BITS as usize,
            available: bits.len(),
        })? as u32;

    let mut top = resolve_top_level(version)?;
    let values = top.pattern().decode_bits(&bits)?;
    top.assign(&values)?;
    let selectors = Selectors::from_tree(&top, version)?;

    let mut full = resolve_full(version, &selectors)?;
    let pattern = full.pattern();
    let values = pattern.decode_bits(&bits)?;
    if bits.len() - pattern.bit_length() >= BITS_PER_SYMBOL {
        return Err(CodecError::UrlLengthMismatch {
            used: pattern.bit_length(),
            available: bits.len(),
        });
    }
    full.assign(&values)?;

    tracing::debug!(version, fields = full.flatten().len(), "decoded parameter url");
    Ok(full)
}

// =============================================================================
// UPDATE
// =============================================================================

/// Sets one leaf and rebuilds the tree around it.
///
/// The schema is re-resolved from the edited selectors, then every previous
/// leaf value is carried over by path. Leaves that no longer exist are
/// dropped; new leaves keep their defaults, as do leaves whose type changed.
///
/// # Example
///
/// ```rust
/// use lamp_codec::range::DataValue;
/// use lamp_codec::schema::{get_default_object, update_data_entry};
/// use lamp_codec::tree::FieldPath;
///
/// let tree = get_default_object(1).unwrap();
/// // Switch the footprint to SquareGrid
/// let tree = update_data_entry(&tree, &FieldPath::from("footprint.type"), DataValue::Int(1)).unwrap();
/// assert!(tree.leaf(&FieldPath::from("footprint.xCount")).is_some());
/// assert!(tree.leaf(&FieldPath::from("footprint.segments")).is_none());
/// ```
pub fn update_data_entry(tree: &DataTree, path: &FieldPath, value: DataValue) -> CodecResult<DataTree> {
    let mut edited = tree.clone();
    edited.set_value(path, value)?;

    let version = tree_version(&edited)?;
    let selectors = Selectors::from_tree(&edited, version)?;
    let mut fresh = resolve_full(version, &selectors)?;

    for (leaf_path, entry) in edited.flatten() {
        if let Some(target) = fresh.leaf_mut(&leaf_path) {
            if target.descriptor.range.accepts(&entry.value) {
                target.value = entry.value.clone();
            }
        }
    }
    Ok(fresh)
}
