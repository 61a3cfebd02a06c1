//! Tree serialization as a preorder (symbol, depth) sequence.
//!
//! `store` walks the tree in preorder (child0 before child1) and emits, for
//! every leaf, its symbol byte followed by its depth byte. Internal nodes
//! emit nothing. The sequence alone is enough to regrow the same shape:
//! `rebuild` keeps an insertion cursor, descends to each leaf's depth
//! creating nodes left slot first, then climbs to the nearest ancestor that
//! still has a free child-1 slot.
//!
//! # Header layout
//!
//! ```text
//! +--------------------+
//! | symbol (1 byte)    |  leaf #0, leftmost in preorder
//! | depth  (1 byte)    |  root = 0
//! +--------------------+
//! | ...                |  one pair per distinct symbol
//! +--------------------+
//! ```
//!
//! Depths fit in a byte: a tree over at most 256 symbols is at most 255
//! levels deep.
//!
//! # Validation
//!
//! `rebuild` rejects sequences that do not describe a full binary tree
//! instead of guessing a shape: leaves past completion, depths that cannot
//! be reached from the cursor, repeated symbols, and sequences that stop
//! while a branch is still open.

use std::io::{Read, Write};

use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{HeaderError, Result};
use crate::tree::{NodeId, Tree};

/// Preorder list of `(symbol, depth)` pairs for every leaf of `tree`.
pub fn leaf_sequence(tree: &Tree) -> Vec<(u8, u8)> {
    let mut pairs = Vec::with_capacity(tree.leaf_count());
    if let Some(root) = tree.root() {
        // Explicit stack; child1 pushed first so child0 is visited first.
        let mut stack: Vec<(NodeId, u8)> = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            let node = tree.node(id);
            if node.is_leaf() {
                pairs.push((node.symbol, depth));
                continue;
            }
            if let Some(child1) = node.child1 {
                stack.push((child1, depth + 1));
            }
            if let Some(child0) = node.child0 {
                stack.push((child0, depth + 1));
            }
        }
    }
    pairs
}

/// Write the header pairs of `tree` through `out`, bypassing the bit buffer.
///
/// Returns the number of pairs written.
pub fn store<W: Write>(tree: &Tree, out: &mut BitWriter<W>) -> Result<usize> {
    let pairs = leaf_sequence(tree);
    for &(symbol, depth) in &pairs {
        out.write_byte(symbol)?;
        out.write_byte(depth)?;
    }
    Ok(pairs.len())
}

/// Read `count` header pairs from `input`.
///
/// # Errors
/// `HeaderError::Truncated` if the stream ends inside the pair list.
pub fn read_pairs<R: Read>(input: &mut BitReader<R>, count: usize) -> Result<Vec<(u8, u8)>> {
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let symbol = input
            .read_byte()?
            .ok_or(HeaderError::Truncated("leaf symbol"))?;
        let depth = input
            .read_byte()?
            .ok_or(HeaderError::Truncated("leaf depth"))?;
        pairs.push((symbol, depth));
    }
    Ok(pairs)
}

/// Reconstruct a tree from preorder `(symbol, depth)` pairs.
///
/// Rebuilt nodes carry zero weight. An empty sequence gives the empty tree,
/// and a single pair at depth 0 gives a lone-leaf root.
///
/// # Errors
/// - `HeaderError::TooManyLeaves` if a pair follows a completed tree
/// - `HeaderError::InconsistentDepth` if a depth cannot be reached from the
///   insertion cursor
/// - `HeaderError::DuplicateSymbol` if a symbol repeats
/// - `HeaderError::IncompleteTree` if the sequence ends with a branch open
pub fn rebuild(pairs: &[(u8, u8)]) -> Result<Tree> {
    let mut tree = Tree::empty();
    if pairs.is_empty() {
        return Ok(tree);
    }

    let root = tree.push_node(0, 0);
    tree.set_root(root);

    let mut cursor = Some(root);
    let mut cursor_depth = 0usize;

    for (index, &(symbol, depth)) in pairs.iter().enumerate() {
        let Some(mut current) = cursor else {
            return Err(HeaderError::TooManyLeaves { index, symbol }.into());
        };
        let target = depth as usize;

        // The cursor is either fresh (a leaf-to-be) or an ancestor waiting
        // for its child1; either way the leaf must lie at or below it.
        if target < cursor_depth || (target == cursor_depth && !tree.node(current).is_leaf()) {
            return Err(HeaderError::InconsistentDepth {
                index,
                depth,
                cursor_depth,
            }
            .into());
        }
        if tree.leaf(symbol).is_some() {
            return Err(HeaderError::DuplicateSymbol(symbol).into());
        }

        while cursor_depth < target {
            let node = tree.node(current);
            let slot = if node.child0.is_none() { 0 } else { 1 };
            let child = tree.push_node(0, 0);
            tree.attach(current, slot, child);
            current = child;
            cursor_depth += 1;
        }

        tree.node_mut(current).symbol = symbol;
        tree.register_leaf(symbol, current);

        // Climb to the nearest ancestor whose child1 slot is still free.
        cursor = None;
        while let Some(parent) = tree.node(current).parent {
            cursor_depth -= 1;
            if tree.node(parent).child1.is_none() {
                cursor = Some(parent);
                break;
            }
            current = parent;
        }
    }

    if cursor.is_some() {
        return Err(HeaderError::IncompleteTree.into());
    }

    debug!(
        leaves = pairs.len(),
        nodes = tree.node_count(),
        "rebuilt tree from header"
    );
    Ok(tree)
}
