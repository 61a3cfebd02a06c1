//! Huffman tree construction from a frequency table.
//!
//! Every symbol with a nonzero count becomes a leaf in a min-heap keyed by
//! `(weight, symbol)`. The two smallest entries are merged repeatedly until
//! one node remains. A merged node takes the symbol of its first-extracted
//! child as its tie-break key, so equal weights always resolve the same way
//! and a given table always yields the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::frequency::FrequencyTable;
use crate::tree::{NodeId, Tree};

/// A node waiting in the merge heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    symbol: u8,
    id: NodeId,
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lighter, then lower symbol, first).
        // Each tie-break symbol is held by exactly one live entry, so the
        // id comparison only keeps Ord total.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.symbol.cmp(&self.symbol))
            .then_with(|| other.id.index().cmp(&self.id.index()))
    }
}

/// Build the Huffman tree for `freqs`.
///
/// - no nonzero counts: the empty tree
/// - one nonzero count: a tree whose root is that leaf
///
/// Runs in O(k log k) for k distinct symbols.
pub fn build(freqs: &FrequencyTable) -> Tree {
    let mut tree = Tree::empty();
    let mut heap = BinaryHeap::with_capacity(freqs.distinct());

    for (symbol, count) in freqs.iter() {
        let id = tree.push_node(count, symbol);
        tree.register_leaf(symbol, id);
        heap.push(HeapEntry {
            weight: count,
            symbol,
            id,
        });
    }

    let leaves = heap.len();
    while heap.len() > 1 {
        let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
            break;
        };

        let weight = first.weight + second.weight;
        let merged = tree.push_node(weight, first.symbol);
        tree.attach(merged, 0, first.id);
        tree.attach(merged, 1, second.id);
        heap.push(HeapEntry {
            weight,
            symbol: first.symbol,
            id: merged,
        });
    }

    if let Some(root) = heap.pop() {
        tree.set_root(root.id);
    }

    debug!(
        leaves,
        nodes = tree.node_count(),
        max_depth = tree.max_depth(),
        "built huffman tree"
    );
    tree
}
