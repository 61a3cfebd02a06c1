//! Error types for huffpack.
//!
//! All operations return structured errors rather than panicking. Compressed
//! files are assumed to be self-produced, but a truncated or hand-edited file
//! still surfaces as one of these variants instead of a crash.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading bits or fixed-width fields past the end of a stream
/// - Huffman: tree construction or encode/decode failures
/// - Header: the (symbol, depth) header or the count fields are malformed
/// - I/O: the underlying reader or writer failed
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., payload ended mid-code)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman coding error (e.g., symbol without a leaf)
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Header error (e.g., inconsistent depth sequence)
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// Underlying stream error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// The stream ended where more bits were expected
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// The stream ended in the middle of a fixed-width integer
    #[error("truncated integer: got {got} of 4 bytes")]
    TruncatedInt { got: usize },
}

/// Huffman coding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Encoding a symbol that has no leaf in the tree
    #[error("symbol {0:#04x} has no leaf in the coding tree")]
    SymbolNotInTree(u8),

    /// Decoding against a tree with no root
    #[error("cannot decode with an empty coding tree")]
    EmptyTree,
}

/// Header parsing and tree reconstruction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// The header ended before all declared fields were read
    #[error("truncated header: {0}")]
    Truncated(&'static str),

    /// The distinct-symbol count cannot describe a byte alphabet
    #[error("invalid distinct symbol count {distinct} for {total} symbols")]
    InvalidDistinctCount { distinct: u32, total: u32 },

    /// A leaf arrived after every branch of the tree was already filled
    #[error("leaf #{index} (symbol {symbol:#04x}) arrives after the tree is complete")]
    TooManyLeaves { index: usize, symbol: u8 },

    /// The depth cannot be reached from the current insertion point
    #[error("leaf #{index} has depth {depth}, inconsistent with insertion depth {cursor_depth}")]
    InconsistentDepth {
        index: usize,
        depth: u8,
        cursor_depth: usize,
    },

    /// The same symbol appears twice in the leaf sequence
    #[error("symbol {0:#04x} appears more than once in the header")]
    DuplicateSymbol(u8),

    /// The sequence ended while some internal node still lacks a child
    #[error("leaf sequence ends before the tree is complete")]
    IncompleteTree,

    /// The input has more symbols than the 32-bit count field can hold
    #[error("input of {0} bytes exceeds the 32-bit symbol count")]
    InputTooLarge(u64),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
