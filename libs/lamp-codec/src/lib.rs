//! # Lamp Codec
//!
//! Versioned, bit-packed URL codec for lamp parameter trees.
//!
//! ## Architecture
//!
//! ```text
//! DataTree ──flatten──▶ DataPattern + values ──bits──▶ URL symbols
//!    ▲                                                     │
//!    └── resolve_full(version, selectors) ◀── two-phase ───┘
//! ```
//!
//! - [`bits`]: bit strings and the 64-symbol alphabet
//! - [`range`]: typed field ranges and their encodings
//! - [`pattern`]: ordered field lists, `create_url` / `deconstruct_url`
//! - [`tree`]: the nested parameter tree
//! - [`schema`]: version schemas, two-phase decode, in-place update
//!
//! ## Usage
//!
//! ```rust
//! use lamp_codec::{decode, encode, get_default_object, update_data_entry};
//! use lamp_codec::range::DataValue;
//! use lamp_codec::tree::FieldPath;
//!
//! let tree = get_default_object(1).unwrap();
//! let tree = update_data_entry(&tree, &FieldPath::from("heights.storyCount"), DataValue::Int(6)).unwrap();
//!
//! let url = encode(&tree).unwrap();
//! let decoded = decode(&url).unwrap();
//! assert_eq!(decoded.value(&FieldPath::from("heights.storyCount")), Some(&DataValue::Int(6)));
//! ```

pub mod bits;
pub mod error;
pub mod pattern;
pub mod range;
pub mod schema;
pub mod tree;

pub use error::{CodecError, CodecResult};
pub use pattern::{create_url, deconstruct_url, DataPattern};
pub use range::{DataRange, DataValue, FieldDescriptor, FloatRange};
pub use schema::{
    decode, encode, get_default_object, resolve_full, resolve_top_level, update_data_entry,
    ExtrusionCategory, FootprintCategory, MethodCategory, Selectors, LATEST_VERSION,
};
pub use tree::{DataEntry, DataTree, FieldPath};
