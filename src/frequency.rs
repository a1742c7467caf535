//! Byte frequency analysis.
//!
//! A [`FrequencyTable`] is the only model the container persists. The decoder rebuilds
//! the code tree from it, so iteration order is fixed (ascending byte value).

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Occurrence count of every byte value present in a source.
///
/// Byte values that never occur have no entry. The sum of all counts equals the
/// source length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut dense = [0u64; 256];
        for &b in data {
            dense[b as usize] += 1;
        }

        let counts = dense
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(b, &count)| (b as u8, count))
            .collect();

        Self {
            counts,
            total: data.len() as u64,
        }
    }

    /// Record `count` occurrences of `symbol`.
    ///
    /// # Errors
    /// Returns `Error::CorruptHeader` if `count` is zero, `symbol` already has an
    /// entry, or the total would overflow `u64`.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Result<()> {
        if count == 0 {
            return Err(Error::CorruptHeader(format!(
                "symbol {symbol:#04x} has a zero frequency"
            )));
        }
        if self.counts.contains_key(&symbol) {
            return Err(Error::CorruptHeader(format!(
                "symbol {symbol:#04x} listed twice"
            )));
        }
        self.total = self.total.checked_add(count).ok_or_else(|| {
            Error::CorruptHeader("frequency sum overflows u64".to_string())
        })?;
        self.counts.insert(symbol, count);
        Ok(())
    }

    /// Occurrence count of `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct byte values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no byte value occurs.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the source length.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
