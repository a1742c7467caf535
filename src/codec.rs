//! Huffman encoder/decoder and the compress/decompress entry points.
//!
//! # Historical Context
//!
//! David Huffman (1952) developed this algorithm as a term paper at MIT.
//! It was the first practical algorithm for constructing optimal prefix codes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::bits::{BitPacker, BitUnpacker, PackedBits};
use crate::code::CodeTable;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    codes: CodeTable,
}

impl HuffmanEncoder {
    /// Create a new Huffman encoder from symbol frequencies.
    pub fn new(frequencies: &FrequencyTable) -> Self {
        let codes = HuffmanTree::build(frequencies)
            .map(|tree| CodeTable::from_tree(&tree))
            .unwrap_or_default();
        log::trace!("code table: {:?}", codes.iter().collect::<Vec<_>>());
        Self { codes }
    }

    /// The code assigned to each symbol.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encode a byte sequence into packed bits.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if `data` holds a byte the frequency table did not.
    pub fn encode(&self, data: &[u8]) -> Result<PackedBits> {
        if let Some(&b) = data.iter().find(|&&b| self.codes.get(b).is_none()) {
            return Err(Error::UnknownSymbol(b));
        }
        Ok(self.pack(data))
    }

    // Every byte of `data` must have a code.
    fn pack(&self, data: &[u8]) -> PackedBits {
        let mut packer = BitPacker::with_capacity(data.len());
        for code in data.iter().filter_map(|&b| self.codes.get(b)) {
            packer.push_code(code.bits());
        }
        packer.finish()
    }
}

/// Huffman decoder.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder {
    tree: Option<HuffmanTree>,
}

impl HuffmanDecoder {
    /// Create a new Huffman decoder from frequencies.
    pub fn new(frequencies: &FrequencyTable) -> Self {
        Self {
            tree: HuffmanTree::build(frequencies),
        }
    }

    /// Decode `symbol_count` symbols from a packed payload.
    ///
    /// Every payload bit must be consumed: the walk has to finish on a leaf right at the
    /// end of the meaningful bits.
    ///
    /// # Errors
    /// - `Error::InvalidTraversal` if `padding` is out of range or the bits end inside a code.
    /// - `Error::TruncatedPayload` if the bits end between codes before `symbol_count` symbols.
    /// - `Error::CorruptHeader` if bits remain after the last symbol, or an empty model
    ///   comes with a payload.
    pub fn decode(&self, payload: &[u8], padding: u8, symbol_count: u64) -> Result<Vec<u8>> {
        let mut bits = BitUnpacker::new(payload, padding)?;

        let root = match &self.tree {
            Some(tree) => tree.root(),
            None if symbol_count == 0 && bits.remaining() == 0 => return Ok(Vec::new()),
            None => {
                return Err(Error::CorruptHeader(format!(
                    "no symbols in the model but {symbol_count} expected and {} payload bits",
                    bits.remaining()
                )))
            }
        };

        // Each symbol takes at least one bit.
        let capacity = symbol_count.min(bits.remaining() as u64) as usize;
        let mut out = Vec::with_capacity(capacity);

        if let Node::Leaf { symbol, .. } = root {
            // Single-symbol model: one `0` bit per occurrence, no walk needed.
            let available = bits.remaining() as u64;
            if available < symbol_count {
                return Err(Error::TruncatedPayload {
                    expected: symbol_count,
                    decoded: available,
                });
            }
            if available > symbol_count {
                return Err(Error::CorruptHeader(format!(
                    "{} payload bits remain after {symbol_count} symbols",
                    available - symbol_count
                )));
            }
            out.resize(capacity, *symbol);
            return Ok(out);
        }

        while (out.len() as u64) < symbol_count {
            let mut node = root;
            let mut steps = 0usize;
            loop {
                match node {
                    Node::Leaf { symbol, .. } => {
                        out.push(*symbol);
                        break;
                    }
                    Node::Internal { left, right, .. } => match bits.next() {
                        Some(bit) => {
                            node = if bit { right } else { left };
                            steps += 1;
                        }
                        None if steps == 0 => {
                            return Err(Error::TruncatedPayload {
                                expected: symbol_count,
                                decoded: out.len() as u64,
                            })
                        }
                        None => {
                            return Err(Error::InvalidTraversal(format!(
                                "bitstream ended {steps} bits into a code after {} symbols",
                                out.len()
                            )))
                        }
                    },
                }
            }
        }

        if bits.remaining() > 0 {
            return Err(Error::CorruptHeader(format!(
                "{} payload bits remain after {symbol_count} symbols",
                bits.remaining()
            )));
        }
        Ok(out)
    }
}

/// Sizes observed by one compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Length of the uncompressed data in bytes.
    pub original_size: u64,
    /// Length of the container in bytes.
    pub compressed_size: u64,
    /// Number of distinct byte values in the uncompressed data.
    pub distinct_symbols: usize,
}

impl CompressionStats {
    /// `compressed_size / original_size`, or `None` for empty input.
    pub fn ratio(&self) -> Option<f64> {
        if self.original_size == 0 {
            None
        } else {
            Some(self.compressed_size as f64 / self.original_size as f64)
        }
    }
}

fn build_container(data: &[u8]) -> Container {
    let frequencies = FrequencyTable::from_bytes(data);
    let packed = HuffmanEncoder::new(&frequencies).pack(data);
    log::debug!(
        "compressed {} bytes: {} symbols, {} payload bytes, padding {}",
        data.len(),
        frequencies.len(),
        packed.bytes.len(),
        packed.padding
    );
    Container::new(frequencies, packed)
}

/// Compress `data` into a self-describing container.
pub fn compress(data: &[u8]) -> Vec<u8> {
    build_container(data).encode()
}

/// Compress `data` and write the container to `writer`.
pub fn compress_to<W: Write>(data: &[u8], writer: W) -> Result<CompressionStats> {
    let container = build_container(data);
    let written = container.write_to(writer)?;
    Ok(CompressionStats {
        original_size: data.len() as u64,
        compressed_size: written as u64,
        distinct_symbols: container.frequencies.len(),
    })
}

/// Decode a parsed container.
pub fn decode_container(container: &Container) -> Result<Vec<u8>> {
    HuffmanDecoder::new(&container.frequencies).decode(
        &container.payload,
        container.padding,
        container.original_len(),
    )
}

/// Restore the bytes a container was made from.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    decode_container(&Container::decode(container)?)
}

/// Read a container from `reader` and restore its bytes.
pub fn decompress_from<R: Read>(reader: R) -> Result<Vec<u8>> {
    decode_container(&Container::read_from(reader)?)
}

/// Compress the file at `input` into a container at `output`.
pub fn compress_file(input: &Path, output: &Path) -> Result<CompressionStats> {
    let mut data = Vec::new();
    BufReader::new(File::open(input)?).read_to_end(&mut data)?;
    let stats = compress_to(&data, BufWriter::new(File::create(output)?))?;
    log::debug!(
        "{} -> {}: {} -> {} bytes",
        input.display(),
        output.display(),
        stats.original_size,
        stats.compressed_size
    );
    Ok(stats)
}

/// Restore the container at `input` into the file at `output`.
///
/// Nothing is written to `output` unless the whole container decodes.
pub fn decompress_file(input: &Path, output: &Path) -> Result<CompressionStats> {
    let mut bytes = Vec::new();
    BufReader::new(File::open(input)?).read_to_end(&mut bytes)?;
    let container = Container::decode(&bytes)?;
    let data = decode_container(&container)?;

    let mut writer = BufWriter::new(File::create(output)?);
    writer.write_all(&data)?;
    writer.flush()?;

    Ok(CompressionStats {
        original_size: data.len() as u64,
        compressed_size: bytes.len() as u64,
        distinct_symbols: container.frequencies.len(),
    })
}
