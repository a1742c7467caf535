//! Code table generation.
//!
//! A depth-first walk of the [`HuffmanTree`] appends `0` for every left step and `1` for
//! every right step. A tree made of a single leaf gives that leaf the code `0`.

use std::fmt;

use bitvec::prelude::*;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// A variable-length bit string, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    /// The bits of this code.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the code has no bits. Never the case for codes from a [`CodeTable`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a prefix of `other` (including equality).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && other.0[..self.len()] == self.0[..]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its code.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>, // symbol -> code
}

impl Default for CodeTable {
    fn default() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::default();
        Self::build_codes(tree.root(), BitVec::new(), &mut table.codes);
        table
    }

    fn build_codes(node: &Node, prefix: BitVec<u8, Msb0>, codes: &mut [Option<Code>]) {
        match node {
            Node::Leaf { symbol, .. } => {
                let bits = if prefix.is_empty() {
                    bitvec![u8, Msb0; 0]
                } else {
                    prefix
                };
                codes[*symbol as usize] = Some(Code(bits));
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(false);
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(true);
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }

    /// Code for `symbol`, or `None` if the symbol is not in the table.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, code)| code.as_ref().map(|code| (s as u8, code)))
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Number of payload bits needed to encode a source with these `frequencies`.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}
