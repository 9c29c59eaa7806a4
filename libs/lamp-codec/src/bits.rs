//! # Bit Strings
//!
//! Growable bit strings (most significant bit first) and the mapping between
//! bits and the 64-symbol URL alphabet.
//!
//! ```text
//! bits:    010011 000001 1
//! padded:  010011 000001 100000
//! symbols: T      B      g
//! ```

use std::fmt;
use std::str::FromStr;

use config::constants::{BITS_PER_SYMBOL, URL_ALPHABET};

use crate::error::{CodecError, CodecResult};

/// An ordered sequence of bits.
///
/// # Example
///
/// ```rust
/// use lamp_codec::bits::Bits;
///
/// let mut bits = Bits::new();
/// bits.push_uint(5, 4);
/// assert_eq!(bits.to_string(), "0101");
/// assert_eq!(bits.read_uint(0, 4), Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bits(Vec<bool>);

impl Bits {
    /// Creates an empty bit string.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates an empty bit string with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    /// Returns the bit at `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Appends the low `width` bits of `value`, most significant first.
    ///
    /// Higher bits of `value` are discarded.
    pub fn push_uint(&mut self, value: u64, width: u32) {
        for shift in (0..width).rev() {
            self.0.push((value >> shift) & 1 == 1);
        }
    }

    /// Reads `width` bits starting at `offset` as an unsigned integer.
    ///
    /// Returns `None` when the range runs past the end.
    pub fn read_uint(&self, offset: usize, width: u32) -> Option<u64> {
        let end = offset.checked_add(width as usize)?;
        let slice = self.0.get(offset..end)?;
        Some(slice.iter().fold(0u64, |acc, bit| (acc << 1) | u64::from(*bit)))
    }

    /// Appends every bit of `other`.
    pub fn extend(&mut self, other: &Bits) {
        self.0.extend_from_slice(&other.0);
    }

    /// Returns a copy padded with zeros to a multiple of `multiple`.
    pub fn padded(&self, multiple: usize) -> Bits {
        let mut padded = self.clone();
        if multiple > 0 {
            while padded.len() % multiple != 0 {
                padded.push(false);
            }
        }
        padded
    }

    /// Iterates over the bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bits {
    type Err = CodecError;

    /// Parses a string of `0` and `1` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(CodecError::InvalidCharacter(other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Bits)
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Bits(iter.into_iter().collect())
    }
}

// =============================================================================
// URL ALPHABET
// =============================================================================

/// Maps bits onto URL symbols, six bits per symbol.
///
/// The bit string is padded with trailing zeros to a multiple of six first.
///
/// # Example
///
/// ```rust
/// use lamp_codec::bits::{parse_bits_to_base64, Bits};
///
/// let bits: Bits = "000000111111".parse().unwrap();
/// assert_eq!(parse_bits_to_base64(&bits), "A_");
/// ```
pub fn parse_bits_to_base64(bits: &Bits) -> String {
    let padded = bits.padded(BITS_PER_SYMBOL);
    padded
        .0
        .chunks(BITS_PER_SYMBOL)
        .map(|chunk| {
            let index = chunk
                .iter()
                .fold(0usize, |acc, bit| (acc << 1) | usize::from(*bit));
            URL_ALPHABET[index] as char
        })
        .collect()
}

/// Maps URL symbols back onto bits.
///
/// # Errors
///
/// Returns [`CodecError::InvalidCharacter`] for symbols outside the alphabet.
pub fn parse_base64_to_bits(url: &str) -> CodecResult<Bits> {
    let mut bits = Bits::with_capacity(url.len() * BITS_PER_SYMBOL);
    for c in url.chars() {
        let index = symbol_value(c).ok_or(CodecError::InvalidCharacter(c))?;
        bits.push_uint(index as u64, BITS_PER_SYMBOL as u32);
    }
    Ok(bits)
}

fn symbol_value(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    URL_ALPHABET.iter().position(|symbol| *symbol == c as u8)
}
