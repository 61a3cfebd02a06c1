//! huffpack-core: byte-oriented Huffman compression
//!
//! This library provides the pieces of a two-pass Huffman file compressor:
//! - Counts byte frequencies and builds a Huffman tree with a deterministic
//!   tie-break
//! - Stores the tree as a preorder list of (symbol, depth) pairs and regrows
//!   it from that list alone
//! - Encodes and decodes symbols through a bit-level stream layer
//!
//! # Architecture
//!
//! - `bitio`: bit reader/writer over byte streams
//! - `tree`: arena-backed coding tree with a symbol-to-leaf index
//! - `frequency`: 256-entry byte frequency table
//! - `builder`: frequency table to Huffman tree
//! - `header`: tree to (symbol, depth) pairs and back
//! - `coder`: symbol encode/decode against a tree
//! - `pipeline`: compress/decompress over the file format
//! - `stats`: per-run statistics
//!
//! # Example
//! ```
//! use huffpack_core::pipeline::{compress_bytes, decompress_bytes};
//!
//! let packed = compress_bytes(b"mississippi").unwrap();
//! assert_eq!(decompress_bytes(&packed).unwrap(), b"mississippi");
//! ```

pub mod bitio;
pub mod builder;
pub mod coder;
pub mod error;
pub mod frequency;
pub mod header;
pub mod pipeline;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::Tree;
