//! Error types for Huffman compression and container decoding.

use thiserror::Error;

/// Error variants for huffpack operations.
///
/// Empty input is not an error: it compresses to a container with no symbols.
#[derive(Debug, Error)]
pub enum Error {
    /// The container header is malformed or inconsistent with the data that follows it.
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    /// The payload ran out of bits on a symbol boundary before every symbol was decoded.
    #[error("truncated payload: expected {expected} symbols, decoded {decoded}")]
    TruncatedPayload {
        /// Number of symbols the header promised.
        expected: u64,
        /// Number of symbols decoded before the bits ran out.
        decoded: u64,
    },

    /// The bitstream cannot be walked through the code tree, or the padding count is out of range.
    #[error("invalid traversal: {0}")]
    InvalidTraversal(String),

    /// A byte to encode has no code in the table the encoder was built from.
    #[error("byte {0:#04x} has no code in the table")]
    UnknownSymbol(u8),

    /// An I/O error occurred while reading or writing a container.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for huffpack operations.
pub type Result<T> = std::result::Result<T, Error>;
