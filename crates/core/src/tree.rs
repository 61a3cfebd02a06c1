//! Coding tree data model.
//!
//! A [`Tree`] owns every node in a single arena (`Vec<Node>`) and refers to
//! nodes by [`NodeId`]. Children are owned edges; the `parent` index is a
//! lookup-only back-reference used to walk from a leaf up to the root while
//! encoding. Dropping the tree drops the arena, so teardown needs no walk.
//!
//! The tree also keeps a 256-entry leaf index so that encoding can jump
//! straight from a symbol to its leaf.

/// Size of the byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One vertex of the coding tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Frequency for leaves, sum of children for internal nodes.
    /// Zero for trees rebuilt from a header.
    pub weight: u64,
    /// Leaf symbol. On internal nodes it is only a tie-break key.
    pub symbol: u8,
    /// Child reached by a 0 bit
    pub child0: Option<NodeId>,
    /// Child reached by a 1 bit
    pub child1: Option<NodeId>,
    /// Back-reference for leaf-to-root walks; `None` on the root
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(weight: u64, symbol: u8) -> Self {
        Self {
            weight,
            symbol,
            child0: None,
            child1: None,
            parent: None,
        }
    }

    /// A node is a leaf iff it has no children.
    pub fn is_leaf(&self) -> bool {
        self.child0.is_none() && self.child1.is_none()
    }

    /// Child in the given slot (0 or 1).
    pub fn child(&self, bit: u8) -> Option<NodeId> {
        if bit == 0 {
            self.child0
        } else {
            self.child1
        }
    }
}

/// A Huffman coding tree over the byte alphabet.
///
/// # Invariants
/// - every leaf reachable from `root` is indexed in `leaves`, and every
///   indexed node is such a leaf
/// - a completed tree has no internal node with a single child
/// - a tree with one distinct symbol has that leaf as its root
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    leaves: [Option<NodeId>; ALPHABET_SIZE],
}

impl Tree {
    /// Create a tree with no nodes.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: [None; ALPHABET_SIZE],
        }
    }

    /// Root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    /// If `id` was not obtained from this tree and lies outside its arena.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Leaf carrying `symbol`, if the symbol occurs in the tree.
    pub fn leaf(&self, symbol: u8) -> Option<NodeId> {
        self.leaves[symbol as usize]
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct symbols (leaves).
    pub fn leaf_count(&self) -> usize {
        self.leaves.iter().filter(|leaf| leaf.is_some()).count()
    }

    /// Symbols present in the tree, in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.leaves
            .iter()
            .enumerate()
            .filter(|(_, leaf)| leaf.is_some())
            .map(|(symbol, _)| symbol as u8)
    }

    /// Depth of a node (root = 0), found by walking parent links.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Code length of every symbol; zero for absent symbols.
    ///
    /// A lone-leaf tree reports a length of zero for its only symbol,
    /// matching the empty code that symbol is given.
    pub fn code_lengths(&self) -> [usize; ALPHABET_SIZE] {
        let mut lengths = [0usize; ALPHABET_SIZE];
        for (symbol, leaf) in self.leaves.iter().enumerate() {
            if let Some(leaf) = leaf {
                lengths[symbol] = self.depth(*leaf);
            }
        }
        lengths
    }

    /// Depth of the deepest leaf (0 for empty and single-leaf trees).
    pub fn max_depth(&self) -> usize {
        self.code_lengths().iter().copied().max().unwrap_or(0)
    }

    /// Root-first code for `symbol` as a sequence of 0/1 values.
    ///
    /// Returns `None` if the symbol has no leaf.
    pub fn code_for(&self, symbol: u8) -> Option<Vec<u8>> {
        let leaf = self.leaf(symbol)?;
        let mut bits = Vec::new();
        let mut current = leaf;
        while let Some(parent) = self.node(current).parent {
            let bit = if self.node(parent).child0 == Some(current) { 0 } else { 1 };
            bits.push(bit);
            current = parent;
        }
        bits.reverse();
        Some(bits)
    }

    /// Whether two trees have the same shape with the same leaf symbols.
    ///
    /// Weights and arena positions are ignored.
    pub fn same_shape(&self, other: &Tree) -> bool {
        match (self.root, other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => self.same_subtree(a, other, b),
            _ => false,
        }
    }

    fn same_subtree(&self, a: NodeId, other: &Tree, b: NodeId) -> bool {
        let (na, nb) = (self.node(a), other.node(b));
        if na.is_leaf() || nb.is_leaf() {
            return na.is_leaf() && nb.is_leaf() && na.symbol == nb.symbol;
        }
        let children_match = |x: Option<NodeId>, y: Option<NodeId>| match (x, y) {
            (Some(x), Some(y)) => self.same_subtree(x, other, y),
            (None, None) => true,
            _ => false,
        };
        children_match(na.child0, nb.child0) && children_match(na.child1, nb.child1)
    }

    // --- construction helpers, used by the builder and the header codec ---

    pub(crate) fn push_node(&mut self, weight: u64, symbol: u8) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(weight, symbol));
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Attach `child` under `parent` in slot 0 or 1.
    pub(crate) fn attach(&mut self, parent: NodeId, bit: u8, child: NodeId) {
        let node = self.node_mut(parent);
        if bit == 0 {
            node.child0 = Some(child);
        } else {
            node.child1 = Some(child);
        }
        self.node_mut(child).parent = Some(parent);
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub(crate) fn register_leaf(&mut self, symbol: u8, leaf: NodeId) {
        self.leaves[symbol as usize] = Some(leaf);
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build  root -> (a, internal -> (b, c))
    fn small_tree() -> Tree {
        let mut tree = Tree::empty();
        let root = tree.push_node(6, b'a');
        let a = tree.push_node(3, b'a');
        let inner = tree.push_node(3, b'b');
        let b = tree.push_node(2, b'b');
        let c = tree.push_node(1, b'c');
        tree.attach(root, 0, a);
        tree.attach(root, 1, inner);
        tree.attach(inner, 0, b);
        tree.attach(inner, 1, c);
        tree.set_root(root);
        tree.register_leaf(b'a', a);
        tree.register_leaf(b'b', b);
        tree.register_leaf(b'c', c);
        tree
    }

    #[test]
    #[should_panic]
    fn test_node_rejects_id_from_larger_tree() {
        let big = small_tree();
        let last = big.leaf(b'c').unwrap();
        let mut tiny = Tree::empty();
        let only = tiny.push_node(1, b'z');
        tiny.set_root(only);
        let _ = tiny.node(last);
    }

    #[test]
    fn test_empty_tree() {
        let tree = Tree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert_eq!(tree.code_for(0), None);
    }

    #[test]
    fn test_depths_and_codes() {
        let tree = small_tree();
        let lengths = tree.code_lengths();
        assert_eq!(lengths[b'a' as usize], 1);
        assert_eq!(lengths[b'b' as usize], 2);
        assert_eq!(lengths[b'c' as usize], 2);
        assert_eq!(tree.max_depth(), 2);

        assert_eq!(tree.code_for(b'a'), Some(vec![0]));
        assert_eq!(tree.code_for(b'b'), Some(vec![1, 0]));
        assert_eq!(tree.code_for(b'c'), Some(vec![1, 1]));
        assert_eq!(tree.code_for(b'z'), None);
    }

    #[test]
    fn test_symbols_ascending() {
        let tree = small_tree();
        assert_eq!(tree.symbols().collect::<Vec<_>>(), vec![b'a', b'b', b'c']);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_same_shape_ignores_weights() {
        let a = small_tree();
        let mut b = small_tree();
        let leaf = b.leaf(b'c').unwrap();
        b.node_mut(leaf).weight = 99;
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&Tree::empty()));
    }

    #[test]
    fn test_same_shape_detects_swapped_symbols() {
        let a = small_tree();
        let mut b = small_tree();
        let leaf = b.leaf(b'c').unwrap();
        b.node_mut(leaf).symbol = b'd';
        assert!(!a.same_shape(&b));
    }
}
