//! # Data Patterns
//!
//! An ordered list of field descriptors with cached bit offsets, and the
//! two URL entry points built on it.

use crate::bits::{parse_base64_to_bits, parse_bits_to_base64, Bits};
use crate::error::{CodecError, CodecResult};
use crate::range::{DataValue, FieldDescriptor};

/// Ordered fields plus the bit offset at which each one starts.
///
/// # Example
///
/// ```rust
/// use lamp_codec::pattern::DataPattern;
/// use lamp_codec::range::{DataRange, FieldDescriptor};
///
/// let pattern = DataPattern::new(vec![
///     FieldDescriptor::new("version", 0, DataRange::version(8).unwrap()),
///     FieldDescriptor::new("flag", 1, DataRange::Boolean),
/// ]);
/// assert_eq!(pattern.offsets(), &[0, 8]);
/// assert_eq!(pattern.bit_length(), 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataPattern {
    fields: Vec<FieldDescriptor>,
    offsets: Vec<usize>,
    bit_length: usize,
}

impl DataPattern {
    /// Creates a pattern, computing offsets once.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let mut offsets = Vec::with_capacity(fields.len());
        let mut cursor = 0usize;
        for field in &fields {
            offsets.push(cursor);
            cursor += field.range.bit_width() as usize;
        }
        Self {
            fields,
            offsets,
            bit_length: cursor,
        }
    }

    /// Fields in encoding order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Bit offset of each field.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Total width of all fields.
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the pattern has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Packs `values` in pattern order.
    ///
    /// # Errors
    ///
    /// Fails if the value count differs from the field count or a value does
    /// not match its field type.
    pub fn encode_bits(&self, values: &[DataValue]) -> CodecResult<Bits> {
        if values.len() != self.fields.len() {
            return Err(CodecError::ValueCountMismatch {
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        let mut bits = Bits::with_capacity(self.bit_length);
        for (field, value) in self.fields.iter().zip(values) {
            field.range.encode(&field.name, value, &mut bits)?;
        }
        Ok(bits)
    }

    /// Reads every field from the front of `bits`.
    ///
    /// Trailing bits beyond the pattern are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UrlTooShort`] if `bits` is shorter than the
    /// pattern.
    pub fn decode_bits(&self, bits: &Bits) -> CodecResult<Vec<DataValue>> {
        if bits.len() < self.bit_length {
            return Err(CodecError::UrlTooShort {
                needed: self.bit_length,
                available: bits.len(),
            });
        }
        self.fields
            .iter()
            .zip(&self.offsets)
            .map(|(field, offset)| {
                field
                    .range
                    .decode(bits, *offset)
                    .ok_or(CodecError::UrlTooShort {
                        needed: self.bit_length,
                        available: bits.len(),
                    })
            })
            .collect()
    }
}

/// Encodes `values` with `pattern` into a URL string.
///
/// # Example
///
/// ```rust
/// use lamp_codec::pattern::{create_url, deconstruct_url, DataPattern};
/// use lamp_codec::range::{DataRange, DataValue, FieldDescriptor};
///
/// let pattern = DataPattern::new(vec![
///     FieldDescriptor::new("version", 0, DataRange::version(8).unwrap()),
///     FieldDescriptor::new("count", 1, DataRange::int(0.0, 10.0).unwrap()),
/// ]);
/// let values = vec![DataValue::Version(0), DataValue::Int(7)];
/// let url = create_url(&values, &pattern).unwrap();
/// assert_eq!(deconstruct_url(&url, &pattern).unwrap(), values);
/// ```
pub fn create_url(values: &[DataValue], pattern: &DataPattern) -> CodecResult<String> {
    let bits = pattern.encode_bits(values)?;
    Ok(parse_bits_to_base64(&bits))
}

/// Decodes a URL string with `pattern`.
///
/// Extra trailing symbols are allowed so a prefix pattern can be read from a
/// longer URL.
pub fn deconstruct_url(url: &str, pattern: &DataPattern) -> CodecResult<Vec<DataValue>> {
    let bits = parse_base64_to_bits(url)?;
    pattern.decode_bits(&bits)
}
