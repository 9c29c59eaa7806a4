//! # Configuration Constants
//!
//! Centralized constants for the lamp pipeline. Every geometry tolerance,
//! topology safety cap and codec parameter is defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances and vertex keys
//! - **Geometry**: Wall coverings, inset limits, profile resolution
//! - **Topology**: Bounds for boundary-loop discovery
//! - **Codec**: URL alphabet and bit-width limits

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-9;

/// Number of decimals kept when hashing vertex positions.
///
/// Two vertices whose coordinates agree after rounding to this many decimals
/// share the same key and are merged when meshes are joined.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_KEY_DECIMALS;
///
/// let scale = 10f64.powi(VERTEX_KEY_DECIMALS);
/// assert_eq!((1.004 * scale).round(), (1.0 * scale).round());
/// ```
pub const VERTEX_KEY_DECIMALS: i32 = 2;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Minimum absolute wall thickness left by a horizontal inset.
///
/// Relative side insets are converted to a distance and never drop below
/// this value, so short edges still get a visible frame.
///
/// # Example
///
/// ```rust
/// use config::constants::MINIMUM_HORIZONTAL_COVERING;
///
/// let relative: f64 = 0.01 * 10.0;
/// assert_eq!(relative.max(MINIMUM_HORIZONTAL_COVERING), MINIMUM_HORIZONTAL_COVERING);
/// ```
pub const MINIMUM_HORIZONTAL_COVERING: f64 = 0.5;

/// Minimum absolute slab thickness left by a vertical inset.
///
/// # Example
///
/// ```rust
/// use config::constants::MINIMUM_VERTICAL_COVERING;
/// assert!(MINIMUM_VERTICAL_COVERING > 0.0);
/// ```
pub const MINIMUM_VERTICAL_COVERING: f64 = 0.5;

/// Largest fraction of a span an inset may consume.
///
/// Keeps opposite insets from crossing when the minimum coverings exceed the
/// available room.
///
/// # Example
///
/// ```rust
/// use config::constants::MAXIMUM_INSET_FRACTION;
/// assert!(MAXIMUM_INSET_FRACTION < 0.5);
/// ```
pub const MAXIMUM_INSET_FRACTION: f64 = 0.45;

/// Default number of samples along a profile arc.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_PROFILE_DIVISIONS;
/// assert!(DEFAULT_PROFILE_DIVISIONS >= 2);
/// ```
pub const DEFAULT_PROFILE_DIVISIONS: u32 = 8;

/// Pointedness below which a profile arc collapses to a straight chamfer.
///
/// # Example
///
/// ```rust
/// use config::constants::CHAMFER_POINTEDNESS_THRESHOLD;
///
/// let pointedness = 0.01;
/// assert!(pointedness < CHAMFER_POINTEDNESS_THRESHOLD);
/// ```
pub const CHAMFER_POINTEDNESS_THRESHOLD: f64 = 0.05;

/// Minimum number of segments for a cylinder footprint.
pub const MIN_CYLINDER_SEGMENTS: u32 = 3;

/// Maximum number of vertices a single footprint or lamp mesh may reach.
///
/// Safety limit against runaway parameter combinations.
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Maximum number of boundary loops extracted from one half-edge mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::BOUNDARY_MAX_LOOPS;
/// assert_eq!(BOUNDARY_MAX_LOOPS, 100);
/// ```
pub const BOUNDARY_MAX_LOOPS: usize = 100;

/// Maximum number of interior edges skipped while rotating around a vertex
/// fan in search of the next naked edge.
///
/// # Example
///
/// ```rust
/// use config::constants::BOUNDARY_MAX_FAN_STEPS;
/// assert!(BOUNDARY_MAX_FAN_STEPS >= 6);
/// ```
pub const BOUNDARY_MAX_FAN_STEPS: usize = 10;

// =============================================================================
// CODEC CONSTANTS
// =============================================================================

/// The 64 symbols of the URL alphabet, in value order.
///
/// # Example
///
/// ```rust
/// use config::constants::URL_ALPHABET;
///
/// assert_eq!(URL_ALPHABET.len(), 64);
/// assert_eq!(URL_ALPHABET[0], b'A');
/// assert_eq!(URL_ALPHABET[63], b'_');
/// ```
pub const URL_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Bits carried by one URL symbol.
pub const BITS_PER_SYMBOL: usize = 6;

/// Width of the global version tag that leads every URL.
///
/// # Example
///
/// ```rust
/// use config::constants::VERSION_BITS;
/// assert_eq!(1u32 << VERSION_BITS, 256);
/// ```
pub const VERSION_BITS: u32 = 8;

/// Largest `max - min` span an integer field may declare.
///
/// # Example
///
/// ```rust
/// use config::constants::INT_MAX_RANGE;
/// assert_eq!(INT_MAX_RANGE + 1, 1024);
/// ```
pub const INT_MAX_RANGE: i64 = 1023;

/// Smallest decimal exponent a float field's range may have.
pub const FLOAT_EXPONENT_MIN: i32 = -4;

/// Largest decimal exponent a float field's range may have.
pub const FLOAT_EXPONENT_MAX: i32 = 3;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Rounds a coordinate to the integer grid used for vertex keys.
///
/// `-0.0` and `0.0` land on the same key.
///
/// # Example
///
/// ```rust
/// use config::constants::key_coordinate;
///
/// assert_eq!(key_coordinate(1.234), 123);
/// assert_eq!(key_coordinate(-0.0), key_coordinate(0.0));
/// ```
#[inline]
pub fn key_coordinate(value: f64) -> i64 {
    let scaled = (value * 10f64.powi(VERTEX_KEY_DECIMALS)).round();
    if scaled == 0.0 {
        0
    } else {
        scaled as i64
    }
}
