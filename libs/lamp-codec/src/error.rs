//! # Codec Errors
//!
//! Error types for descriptor construction, bit packing and schema
//! resolution.
//!
//! ## Error Policy
//!
//! - Invalid descriptors fail at construction, never at encode time
//! - Decoding is best-effort inside the fixed bit widths; only structural
//!   problems (short strings, unknown versions or selectors) are errors

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building schemas or packing values.
///
/// ## Example
///
/// ```rust
/// use lamp_codec::{decode, CodecError};
///
/// match decode("") {
///     Ok(tree) => println!("decoded {} fields", tree.flatten().len()),
///     Err(CodecError::UrlTooShort { needed, available }) => {
///         eprintln!("need {needed} bits, have {available}")
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Integer field declared with fractional bounds.
    #[error("Integer field bounds must be whole numbers: min={min}, max={max}")]
    NonIntegerBounds {
        /// Declared lower bound
        min: f64,
        /// Declared upper bound
        max: f64,
    },

    /// Integer field spanning more values than ten bits can hold.
    #[error("Integer field range {min}..={max} exceeds 1023")]
    IntRangeTooLarge {
        /// Declared lower bound
        min: i64,
        /// Declared upper bound
        max: i64,
    },

    /// Empty or inverted range, or an unusable bit width.
    #[error("Invalid field range: {message}")]
    InvalidRange {
        /// Description of the problem
        message: String,
    },

    /// Float field whose range decade falls outside the exponent table.
    #[error("Float range exponent {exponent} outside [-4, 3]")]
    FloatExponentOutOfRange {
        /// The derived decimal exponent of `max - min`
        exponent: i32,
    },

    /// Character outside the 64-symbol URL alphabet.
    #[error("Invalid URL character '{0}'")]
    InvalidCharacter(char),

    /// URL carries fewer bits than the pattern needs.
    #[error("URL too short: pattern needs {needed} bits, {available} available")]
    UrlTooShort {
        /// Bits required by the pattern
        needed: usize,
        /// Bits carried by the URL
        available: usize,
    },

    /// URL carries more symbols than the resolved pattern accounts for.
    #[error("URL length mismatch: pattern uses {used} bits, URL carries {available}")]
    UrlLengthMismatch {
        /// Bits consumed by the full pattern
        used: usize,
        /// Bits carried by the URL
        available: usize,
    },

    /// Number of values differs from the number of pattern fields.
    #[error("Pattern has {expected} fields but {actual} values were supplied")]
    ValueCountMismatch {
        /// Field count of the pattern
        expected: usize,
        /// Supplied value count
        actual: usize,
    },

    /// Value variant does not match the field type.
    #[error("Value for field '{field}' does not match its type")]
    ValueMismatch {
        /// Field name
        field: String,
    },

    /// No schema is registered for the decoded version.
    #[error("No schema registered for version {0}")]
    VersionNotFound(u32),

    /// Selector code has no category in this version.
    #[error("Unknown {selector} code {code} for version {version}")]
    UnknownSelector {
        /// Selector field name
        selector: &'static str,
        /// Decoded integer code
        code: i64,
        /// Schema version
        version: u32,
    },

    /// Field path does not address a leaf in the tree.
    #[error("Field path '{0}' not found")]
    PathNotFound(String),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::UrlTooShort {
            needed: 30,
            available: 12,
        };
        assert!(err.to_string().contains("30"));
        assert!(err.to_string().contains("12"));

        let err = CodecError::VersionNotFound(9);
        assert_eq!(err.to_string(), "No schema registered for version 9");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodecError>();
    }
}
