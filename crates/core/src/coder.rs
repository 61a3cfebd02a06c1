//! Symbol encoding and decoding against a coding tree.
//!
//! Encoding walks parent links from a symbol's leaf up to the root and
//! emits the collected bits root-first. Decoding reads bits from the root
//! down until it lands on a leaf.
//!
//! A tree with a single leaf gives that symbol the empty code: `encode`
//! writes nothing and `decode` returns the symbol without reading. The
//! symbol count in the file header is what bounds the output in that case.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{HuffmanError, Result};
use crate::tree::Tree;

/// Longest possible code: a fully skewed tree over 256 symbols.
const MAX_CODE_LEN: usize = 255;

/// Write the code for `symbol` to `out`, root-first.
///
/// # Errors
/// `HuffmanError::SymbolNotInTree` if the symbol has no leaf.
pub fn encode<W: Write>(tree: &Tree, symbol: u8, out: &mut BitWriter<W>) -> Result<()> {
    let leaf = tree
        .leaf(symbol)
        .ok_or(HuffmanError::SymbolNotInTree(symbol))?;

    let mut path = [0u8; MAX_CODE_LEN];
    let mut len = 0;
    let mut current = leaf;
    while let Some(parent) = tree.node(current).parent {
        path[len] = if tree.node(parent).child0 == Some(current) { 0 } else { 1 };
        len += 1;
        current = parent;
    }

    for &bit in path[..len].iter().rev() {
        out.write_bit(bit)?;
    }
    Ok(())
}

/// Read one code from `input` and return its symbol.
///
/// # Errors
/// - `HuffmanError::EmptyTree` if the tree has no root
/// - `BitIoError::UnexpectedEof` if the stream ends mid-code
pub fn decode<R: Read>(tree: &Tree, input: &mut BitReader<R>) -> Result<u8> {
    let mut current = tree.root().ok_or(HuffmanError::EmptyTree)?;
    loop {
        let node = tree.node(current);
        if node.is_leaf() {
            return Ok(node.symbol);
        }
        let bit = input.require_bit()?;
        // A completed tree has both children on every internal node.
        current = node.child(bit).ok_or(HuffmanError::EmptyTree)?;
    }
}

/// Encode every byte of `data` through `out`.
pub fn encode_all<W: Write>(tree: &Tree, data: &[u8], out: &mut BitWriter<W>) -> Result<()> {
    for &symbol in data {
        encode(tree, symbol, out)?;
    }
    Ok(())
}

/// Decode exactly `count` symbols from `input`.
pub fn decode_n<R: Read>(tree: &Tree, input: &mut BitReader<R>, count: usize) -> Result<Vec<u8>> {
    let mut symbols = Vec::with_capacity(count);
    for _ in 0..count {
        symbols.push(decode(tree, input)?);
    }
    Ok(symbols)
}
