//! # huffpack
//!
//! *Huffman-coded file compression in a self-describing container.*
//!
//! ## Intuition First
//!
//! Plain files spend eight bits on every byte, whether it shows up once or ten thousand
//! times. Huffman coding gives frequent bytes short bit strings and rare bytes long ones.
//! Because no code is a prefix of another, the bit strings can be glued together with no
//! separators and still be split apart again unambiguously.
//!
//! ## The Problem
//!
//! The decoder must arrive at exactly the same codes as the encoder. Storing the codes is
//! one option; storing the byte frequencies and rebuilding the tree is the one taken here.
//! That only works if tree construction is deterministic, including every tie between
//! equal weights.
//!
//! ## Pipeline
//!
//! ```text
//! compress:    bytes -> FrequencyTable -> HuffmanTree -> CodeTable -> BitPacker -> Container
//! decompress:  Container -> FrequencyTable -> HuffmanTree -> tree walk over BitUnpacker -> bytes
//! ```
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(n + k \log k)$ for $n$ input bytes and $k \le 256$ distinct values.
//! - **Space**: the whole input and output are held in memory.
//!
//! ## Failure Modes
//!
//! 1. **Corrupt header**: bad signature, inconsistent symbol count, counts that do not sum
//!    to the stored length.
//! 2. **Truncated payload**: fewer bits than the header's symbols need.
//! 3. **Invalid traversal**: bits end in the middle of a code, or the padding count is not
//!    in `0..=7`.
//!
//! Decoding never returns partial output.
//!
//! ## Example
//!
//! ```
//! let compressed = huffpack::compress(b"abracadabra");
//! let restored = huffpack::decompress(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod tree;

pub use code::{Code, CodeTable};
pub use codec::{
    compress, compress_file, compress_to, decode_container, decompress, decompress_file,
    decompress_from, CompressionStats, HuffmanDecoder, HuffmanEncoder,
};
pub use container::Container;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::HuffmanTree;
