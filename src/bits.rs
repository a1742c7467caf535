//! Bit packing and unpacking.
//!
//! The logical bitstream is stored most significant bit first: the first code bit lands
//! in bit 7 of byte 0. The last byte is filled with zero bits, and the number of filler
//! bits (0-7) travels next to the bytes as the padding count.

use bitvec::prelude::*;

use crate::error::{Error, Result};

/// Largest valid padding count.
pub const MAX_PADDING: u8 = 7;

/// Byte-aligned bits plus the count of trailing filler bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bytes.
    pub bytes: Vec<u8>,
    /// Number of filler bits at the end of the last byte, in `0..=7`.
    pub padding: u8,
}

impl PackedBits {
    /// Number of meaningful bits.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 - self.padding as u64
    }
}

/// Accumulates codes into a byte-aligned buffer.
#[derive(Debug, Default)]
pub struct BitPacker {
    bits: BitVec<u8, Msb0>,
}

impl BitPacker {
    /// Create an empty packer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty packer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Append `code` to the stream.
    pub fn push_code(&mut self, code: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(code);
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of bits pushed so far.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Pad to a byte boundary with zero bits and return the bytes.
    pub fn finish(self) -> PackedBits {
        let padding = ((8 - self.bits.len() % 8) % 8) as u8;
        let mut bytes = self.bits.into_vec();
        if let Some(last) = bytes.last_mut() {
            *last &= 0xFFu8 << padding;
        }
        PackedBits { bytes, padding }
    }
}

/// Iterates the logical bits of a packed payload, skipping the trailing padding.
#[derive(Debug)]
pub struct BitUnpacker<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitUnpacker<'a> {
    /// Wrap `bytes`, dropping the last `padding` bits.
    ///
    /// # Errors
    /// Returns `Error::InvalidTraversal` if `padding` exceeds 7, or if it is non-zero while
    /// `bytes` is empty.
    pub fn new(bytes: &'a [u8], padding: u8) -> Result<Self> {
        if padding > MAX_PADDING {
            return Err(Error::InvalidTraversal(format!(
                "padding count {padding} is outside 0..={MAX_PADDING}"
            )));
        }
        if bytes.is_empty() && padding != 0 {
            return Err(Error::InvalidTraversal(format!(
                "padding count {padding} with an empty payload"
            )));
        }
        let all = bytes.view_bits::<Msb0>();
        Ok(Self {
            bits: &all[..all.len() - padding as usize],
            pos: 0,
        })
    }

    /// Number of bits not yet read.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}

impl Iterator for BitUnpacker<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for BitUnpacker<'_> {}
