//! The `.huf` container format.
//!
//! ```text
//! offset  size  field
//! 0       4     magic "HUFP"
//! 4       1     version (1)
//! 5       2     symbol count n, u16 LE, 0..=256
//! 7       8     original length, u64 LE, equals the sum of all counts
//! 15      9*n   n entries: symbol u8, count u64 LE; symbols strictly ascending
//! 15+9n   1     padding bit count, 0..=7
//! 16+9n   ..    payload
//! ```
//!
//! The container stores frequencies rather than codes; the decoder rebuilds the tree.

use std::io::{self, Read, Write};

use crate::bits::{PackedBits, MAX_PADDING};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// File signature.
pub const MAGIC: [u8; 4] = *b"HUFP";

/// Format version written by this crate.
pub const VERSION: u8 = 1;

/// Size of one `(symbol, count)` entry.
pub const ENTRY_SIZE: usize = 9;

/// Size of the fixed fields before the entries.
pub const FIXED_HEADER_SIZE: usize = MAGIC.len() + 1 + 2 + 8;

/// A parsed or ready-to-write container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Persisted model.
    pub frequencies: FrequencyTable,
    /// Filler bits at the end of `payload`.
    pub padding: u8,
    /// Packed code bits.
    pub payload: Vec<u8>,
}

impl Container {
    /// Combine a model with the bits encoded under it.
    pub fn new(frequencies: FrequencyTable, packed: PackedBits) -> Self {
        Self {
            frequencies,
            padding: packed.padding,
            payload: packed.bytes,
        }
    }

    /// Length of the source this container was made from.
    pub fn original_len(&self) -> u64 {
        self.frequencies.total()
    }

    /// Size of the header in bytes.
    pub fn header_len(&self) -> usize {
        FIXED_HEADER_SIZE + self.frequencies.len() * ENTRY_SIZE + 1
    }

    /// Size of the serialized container in bytes.
    pub fn encoded_len(&self) -> usize {
        self.header_len() + self.payload.len()
    }

    /// Serialize into a new buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.write_header(&mut bytes);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Serialize into `writer`. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut header = Vec::with_capacity(self.header_len());
        self.write_header(&mut header);
        writer.write_all(&header)?;
        writer.write_all(&self.payload)?;
        writer.flush()?;
        Ok(header.len() + self.payload.len())
    }

    fn write_header(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&(self.frequencies.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.frequencies.total().to_le_bytes());
        for (symbol, count) in self.frequencies.iter() {
            out.push(symbol);
            out.extend_from_slice(&count.to_le_bytes());
        }
        out.push(self.padding);
    }

    /// Parse a container from `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }

    /// Parse a container from `reader`, consuming it to the end.
    ///
    /// # Errors
    /// `Error::CorruptHeader` for a bad signature, unknown version, short header,
    /// more than 256 symbols, zero or duplicate counts, symbols out of order, or counts
    /// that do not sum to the original length. `Error::InvalidTraversal` for a padding
    /// count above 7. `Error::Io` if reading fails.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let magic: [u8; 4] = read_field(&mut reader, "magic")?;
        if magic != MAGIC {
            return Err(Error::CorruptHeader(format!("bad magic {magic:02x?}")));
        }

        let [version]: [u8; 1] = read_field(&mut reader, "version")?;
        if version != VERSION {
            return Err(Error::CorruptHeader(format!(
                "unsupported version {version}"
            )));
        }

        let symbol_count = u16::from_le_bytes(read_field(&mut reader, "symbol count")?) as usize;
        if symbol_count > 256 {
            return Err(Error::CorruptHeader(format!(
                "symbol count {symbol_count} exceeds 256"
            )));
        }

        let original_len = u64::from_le_bytes(read_field(&mut reader, "original length")?);

        let mut frequencies = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        for i in 0..symbol_count {
            let entry: [u8; ENTRY_SIZE] = read_field(&mut reader, "frequency entry").map_err(
                |err| match err {
                    Error::CorruptHeader(_) => Error::CorruptHeader(format!(
                        "header claims {symbol_count} symbols but entry {i} is incomplete"
                    )),
                    other => other,
                },
            )?;
            let symbol = entry[0];
            let mut count = [0u8; 8];
            count.copy_from_slice(&entry[1..]);
            let count = u64::from_le_bytes(count);

            if previous.is_some_and(|p| symbol <= p) {
                return Err(Error::CorruptHeader(format!(
                    "symbol {symbol:#04x} out of order at entry {i}"
                )));
            }
            previous = Some(symbol);
            frequencies.insert(symbol, count)?;
        }

        if frequencies.total() != original_len {
            return Err(Error::CorruptHeader(format!(
                "frequencies sum to {} but original length is {original_len}",
                frequencies.total()
            )));
        }

        let [padding]: [u8; 1] = read_field(&mut reader, "padding")?;
        if padding > MAX_PADDING {
            return Err(Error::InvalidTraversal(format!(
                "padding count {padding} is outside 0..={MAX_PADDING}"
            )));
        }

        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;

        log::debug!(
            "parsed container: {} symbols, {} original bytes, {} payload bytes, padding {}",
            symbol_count,
            original_len,
            payload.len(),
            padding
        );

        Ok(Self {
            frequencies,
            padding,
            payload,
        })
    }
}

fn read_field<R: Read, const N: usize>(reader: &mut R, field: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => {
            Error::CorruptHeader(format!("truncated header while reading {field}"))
        }
        _ => Error::Io(err),
    })?;
    Ok(buf)
}
