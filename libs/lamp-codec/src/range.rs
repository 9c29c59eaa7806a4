//! # Field Ranges
//!
//! Typed field descriptors and their fixed-width bit encodings.
//!
//! ## Bit Layouts
//!
//! | Range | Width | Layout |
//! |---|---|---|
//! | `Version { bits }` | `bits` | unsigned value |
//! | `Int { min, max, bits }` | `bits` | `value - min` |
//! | `Float` | `E + S` | exponent code, then significand |
//! | `Boolean` | 1 | the bit |
//!
//! ## Float Scheme
//!
//! A float field stores a decimal significand and a small exponent code.
//! The code selects a delta from a fixed table; the decoded value is
//! `min + significand * 10^(delta - precision)`. Encoding picks the finest
//! delta whose significand still fits, so values near `min` keep extra
//! digits while the full range stays reachable at `precision` decimals.

use serde::{Deserialize, Serialize};

use config::constants::{FLOAT_EXPONENT_MAX, FLOAT_EXPONENT_MIN, INT_MAX_RANGE};

use crate::bits::Bits;
use crate::error::{CodecError, CodecResult};

/// Exponent delta tables, indexed by exponent bit width.
const EXPONENT_TABLE_0: &[i32] = &[0];
const EXPONENT_TABLE_1: &[i32] = &[-1, 0];
const EXPONENT_TABLE_2: &[i32] = &[-2, -1, 0, 1];
const EXPONENT_TABLE_3: &[i32] = &[-4, -3, -2, -1, 0, 1, 2, 3];

/// Widest significand a float field may use while staying exact in f64.
const MAX_SIGNIFICAND_BITS: u32 = 48;

// =============================================================================
// VALUES
// =============================================================================

/// A single decoded or to-be-encoded field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataValue {
    /// Schema version tag
    Version(u32),
    /// Bounded integer
    Int(i64),
    /// Bounded decimal
    Float(f64),
    /// Flag
    Boolean(bool),
}

impl DataValue {
    /// Returns the value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(v) => Some(*v),
            DataValue::Version(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Returns the value as a float; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(v) => Some(*v),
            DataValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns the value as a flag, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the version tag, if this is one.
    pub fn as_version(&self) -> Option<u32> {
        match self {
            DataValue::Version(v) => Some(*v),
            _ => None,
        }
    }
}

// =============================================================================
// FLOAT RANGE
// =============================================================================

/// Bit layout of a bounded decimal field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Guaranteed decimals
    pub precision: u32,
    /// `floor(log10(max - min))`
    pub exponent: i32,
    /// Width of the significand
    pub significand_bits: u32,
    /// Width of the exponent code
    pub exponent_bits: u32,
}

impl FloatRange {
    /// Derives the layout for `[min, max]` at `precision` decimals.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidRange`] for empty or non-finite bounds
    /// - [`CodecError::FloatExponentOutOfRange`] when the span's decade is
    ///   outside `[-4, 3]`
    ///
    /// # Example
    ///
    /// ```rust
    /// use lamp_codec::range::FloatRange;
    ///
    /// let range = FloatRange::new(-1.0, 1.0, 1).unwrap();
    /// assert_eq!(range.exponent, 0);
    /// assert_eq!(range.exponent_bits, 0);
    /// assert_eq!(range.significand_bits, 5);
    /// ```
    pub fn new(min: f64, max: f64, precision: u32) -> CodecResult<Self> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(CodecError::InvalidRange {
                message: format!("float range [{min}, {max}] is empty"),
            });
        }

        let span = max - min;
        let exponent = span.log10().floor() as i32;
        if !(FLOAT_EXPONENT_MIN..=FLOAT_EXPONENT_MAX).contains(&exponent) {
            return Err(CodecError::FloatExponentOutOfRange { exponent });
        }

        let steps = (span * scale(precision as i32)).round();
        let significand_bits = bits_for_span(steps as u64).max(1);
        if significand_bits > MAX_SIGNIFICAND_BITS {
            return Err(CodecError::InvalidRange {
                message: format!("precision {precision} needs {significand_bits} significand bits"),
            });
        }

        let exponent_bits = match exponent {
            e if e <= 0 => 0,
            1 => 1,
            2 => 2,
            _ => 3,
        };

        Ok(Self {
            min,
            max,
            precision,
            exponent,
            significand_bits,
            exponent_bits,
        })
    }

    /// Total encoded width.
    #[inline]
    pub fn bit_width(&self) -> u32 {
        self.significand_bits + self.exponent_bits
    }

    /// Exponent deltas addressable by this layout.
    pub fn exponent_table(&self) -> &'static [i32] {
        match self.exponent_bits {
            0 => EXPONENT_TABLE_0,
            1 => EXPONENT_TABLE_1,
            2 => EXPONENT_TABLE_2,
            _ => EXPONENT_TABLE_3,
        }
    }

    fn encode(&self, value: f64, bits: &mut Bits) {
        let clamped = value.clamp(self.min, self.max);
        let limit = 1u64 << self.significand_bits;
        let table = self.exponent_table();
        let offset = clamped - self.min;

        // Table is ascending, so the first fit is the finest resolution
        let chosen = table.iter().enumerate().find_map(|(code, delta)| {
            let significand = (offset * scale(self.precision as i32 - delta)).round();
            (significand >= 0.0 && (significand as u64) < limit)
                .then_some((code as u64, significand as u64))
        });
        let (code, significand) = chosen.unwrap_or((0, limit - 1));

        bits.push_uint(code, self.exponent_bits);
        bits.push_uint(significand, self.significand_bits);
    }

    fn decode(&self, bits: &Bits, offset: usize) -> Option<f64> {
        let code = bits.read_uint(offset, self.exponent_bits)? as usize;
        let significand = bits.read_uint(offset + self.exponent_bits as usize, self.significand_bits)?;
        let table = self.exponent_table();
        let delta = table.get(code).copied().unwrap_or(0);
        let decimals = self.precision as i32 - delta;
        let raw = self.min + significand as f64 / scale(decimals);
        Some(round_to(raw, decimals))
    }
}

// =============================================================================
// DATA RANGE
// =============================================================================

/// The typed range of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataRange {
    /// Schema version tag of a fixed width
    Version {
        /// Field width
        bits: u32,
    },
    /// Integer in `[min, max]`
    Int {
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
        /// Derived width
        bits: u32,
    },
    /// Decimal in `[min, max]`
    Float(FloatRange),
    /// Single flag
    Boolean,
}

impl DataRange {
    /// Creates a version range of `bits` width.
    pub fn version(bits: u32) -> CodecResult<Self> {
        if bits == 0 || bits > 32 {
            return Err(CodecError::InvalidRange {
                message: format!("version width {bits} outside 1..=32"),
            });
        }
        Ok(DataRange::Version { bits })
    }

    /// Creates an integer range.
    ///
    /// Bounds arrive as `f64` so fractional declarations are caught here.
    ///
    /// # Errors
    ///
    /// - [`CodecError::NonIntegerBounds`] for fractional bounds
    /// - [`CodecError::IntRangeTooLarge`] when `max - min > 1023`
    /// - [`CodecError::InvalidRange`] when `max < min`
    ///
    /// # Example
    ///
    /// ```rust
    /// use lamp_codec::range::DataRange;
    ///
    /// let range = DataRange::int(0.0, 10.0).unwrap();
    /// assert_eq!(range.bit_width(), 4);
    /// assert!(DataRange::int(0.0, 1024.0).is_err());
    /// assert!(DataRange::int(0.5, 3.0).is_err());
    /// ```
    pub fn int(min: f64, max: f64) -> CodecResult<Self> {
        if min.fract() != 0.0 || max.fract() != 0.0 || !min.is_finite() || !max.is_finite() {
            return Err(CodecError::NonIntegerBounds { min, max });
        }
        let (min, max) = (min as i64, max as i64);
        if max < min {
            return Err(CodecError::InvalidRange {
                message: format!("integer range [{min}, {max}] is inverted"),
            });
        }
        if max - min > INT_MAX_RANGE {
            return Err(CodecError::IntRangeTooLarge { min, max });
        }
        let bits = bits_for_span((max - min) as u64).max(1);
        Ok(DataRange::Int { min, max, bits })
    }

    /// Creates a float range. See [`FloatRange::new`].
    pub fn float(min: f64, max: f64, precision: u32) -> CodecResult<Self> {
        FloatRange::new(min, max, precision).map(DataRange::Float)
    }

    /// Encoded width in bits.
    pub fn bit_width(&self) -> u32 {
        match self {
            DataRange::Version { bits } => *bits,
            DataRange::Int { bits, .. } => *bits,
            DataRange::Float(range) => range.bit_width(),
            DataRange::Boolean => 1,
        }
    }

    /// Returns true if `value` has the variant this range encodes.
    pub fn accepts(&self, value: &DataValue) -> bool {
        matches!(
            (self, value),
            (DataRange::Version { .. }, DataValue::Version(_))
                | (DataRange::Int { .. }, DataValue::Int(_))
                | (DataRange::Float(_), DataValue::Float(_))
                | (DataRange::Boolean, DataValue::Boolean(_))
        )
    }

    /// Appends the encoding of `value`.
    ///
    /// Out-of-range numbers are clamped into the declared bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ValueMismatch`] if the value variant does not
    /// match this range.
    pub fn encode(&self, name: &str, value: &DataValue, bits: &mut Bits) -> CodecResult<()> {
        match (self, value) {
            (DataRange::Version { bits: width }, DataValue::Version(v)) => {
                bits.push_uint(u64::from(*v), *width);
            }
            (DataRange::Int { min, max, bits: width }, DataValue::Int(v)) => {
                let clamped = (*v).clamp(*min, *max);
                if clamped != *v {
                    tracing::warn!(field = %name, value = *v, min, max, "clamping integer field");
                }
                bits.push_uint((clamped - min) as u64, *width);
            }
            (DataRange::Float(range), DataValue::Float(v)) => {
                if *v < range.min || *v > range.max || v.is_nan() {
                    tracing::warn!(
                        field = %name,
                        value = *v,
                        min = range.min,
                        max = range.max,
                        "clamping float field"
                    );
                }
                let value = if v.is_nan() { range.min } else { *v };
                range.encode(value, bits);
            }
            (DataRange::Boolean, DataValue::Boolean(v)) => bits.push(*v),
            _ => {
                return Err(CodecError::ValueMismatch {
                    field: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Decodes the field starting at `offset`.
    ///
    /// Integers wrap inside their span; floats are returned as read.
    /// Returns `None` when the bits run out.
    pub fn decode(&self, bits: &Bits, offset: usize) -> Option<DataValue> {
        match self {
            DataRange::Version { bits: width } => bits
                .read_uint(offset, *width)
                .map(|v| DataValue::Version(v as u32)),
            DataRange::Int { min, max, bits: width } => {
                let raw = bits.read_uint(offset, *width)? as i64;
                let span = max - min + 1;
                Some(DataValue::Int(min + raw.rem_euclid(span)))
            }
            DataRange::Float(range) => range.decode(bits, offset).map(DataValue::Float),
            DataRange::Boolean => bits.get(offset).map(DataValue::Boolean),
        }
    }
}

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// A named, ordered field of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Leaf name, unique within its branch
    pub name: String,
    /// Position in the flattened pattern
    pub index: u32,
    /// Typed range
    pub range: DataRange,
}

impl FieldDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, index: u32, range: DataRange) -> Self {
        Self {
            name: name.into(),
            index,
            range,
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn scale(decimals: i32) -> f64 {
    10f64.powi(decimals)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = scale(decimals);
    (value * factor).round() / factor
}

/// Number of bits needed to store every integer in `0..=span`.
fn bits_for_span(span: u64) -> u32 {
    u64::BITS - span.leading_zeros()
}
