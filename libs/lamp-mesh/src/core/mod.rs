//! Core vector types shared by every geometry module.
//!
//! Includes the `V2`/`V3` aliases and the fixed-precision [`vec3::VertexKey`].

pub mod vec2;
pub mod vec3;

pub use vec2::V2;
pub use vec3::{VertexKey, V3};
