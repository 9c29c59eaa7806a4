//! # Config Crate
//!
//! Centralized configuration constants for the lamp pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency between the geometry kernel and the parameter codec.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, MINIMUM_VERTICAL_COVERING, URL_ALPHABET};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 1e-11;
//! assert!(value.abs() < EPSILON);
//!
//! // Inset clamps never drop below the minimum covering
//! let inset = (0.001 * 40.0_f64).max(MINIMUM_VERTICAL_COVERING);
//! assert_eq!(inset, MINIMUM_VERTICAL_COVERING);
//!
//! assert_eq!(URL_ALPHABET.len(), 64);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain constants and tiny helpers only
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
