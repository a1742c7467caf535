//! Huffman tree construction.
//!
//! Greedy minimal-weight merging over a min-priority queue.
//!
//! # Tie-breaking
//!
//! Both the encoder and the decoder build the tree from the same [`FrequencyTable`],
//! so construction must be reproducible. Every queued node carries an `order` number:
//! leaves get `0, 1, 2, ...` in ascending byte order and each merged node gets the next
//! unused number. The queue pops the lowest `(weight, order)` pair. The first node popped
//! becomes the left child, the second the right child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single byte value and its occurrence count.
    Leaf {
        /// The byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Two subtrees; the weight is the sum of theirs.
    Internal {
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
        /// Sum of both children's weights.
        weight: u64,
    },
}

impl Node {
    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// True for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn merge(left: Node, right: Node) -> Node {
        let weight = left.weight() + right.weight();
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Queue entry; `order` makes the key a total order.
#[derive(Debug)]
struct Queued {
    weight: u64,
    order: usize,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for Queued {}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman code tree with at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    ///
    /// Returns `None` for an empty table. A table with a single symbol yields a tree
    /// whose root is that leaf.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut pq = BinaryHeap::with_capacity(frequencies.len());
        for (order, (symbol, weight)) in frequencies.iter().enumerate() {
            pq.push(Queued {
                weight,
                order,
                node: Node::Leaf { symbol, weight },
            });
        }

        let mut next_order = pq.len();
        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            let node = Node::merge(left.node, right.node);
            pq.push(Queued {
                weight: node.weight(),
                order: next_order,
                node,
            });
            next_order += 1;
        }

        let tree = pq.pop().map(|queued| Self { root: queued.node });
        if let Some(tree) = &tree {
            log::trace!(
                "built huffman tree: {} leaves, depth {}, weight {}",
                tree.leaf_count(),
                tree.depth(),
                tree.weight()
            );
        }
        tree
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, equal to the source length.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves, equal to the number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path. Zero for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(pairs: &[(u8, u64)]) -> FrequencyTable {
        let mut t = FrequencyTable::new();
        for &(s, c) in pairs {
            t.insert(s, c).unwrap();
        }
        t
    }

    #[test]
    fn test_empty_table_has_no_tree() {
        assert!(HuffmanTree::build(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn test_single_symbol_is_leaf_root() {
        let tree = HuffmanTree::build(&table(&[(b'A', 4)])).unwrap();
        assert_eq!(
            tree.root(),
            &Node::Leaf {
                symbol: b'A',
                weight: 4
            }
        );
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_two_symbols_lighter_goes_left() {
        let tree = HuffmanTree::build(&table(&[(b'a', 5), (b'b', 2)])).unwrap();
        match tree.root() {
            Node::Internal {
                left,
                right,
                weight,
            } => {
                assert_eq!(*weight, 7);
                assert_eq!(
                    **left,
                    Node::Leaf {
                        symbol: b'b',
                        weight: 2
                    }
                );
                assert_eq!(
                    **right,
                    Node::Leaf {
                        symbol: b'a',
                        weight: 5
                    }
                );
            }
            Node::Leaf { .. } => panic!("expected an internal root"),
        }
    }

    #[test]
    fn test_equal_weights_break_ties_by_byte_order() {
        let tree = HuffmanTree::build(&table(&[(b'z', 1), (b'a', 1)])).unwrap();
        match tree.root() {
            Node::Internal { left, right, .. } => {
                assert!(matches!(**left, Node::Leaf { symbol: b'a', .. }));
                assert!(matches!(**right, Node::Leaf { symbol: b'z', .. }));
            }
            Node::Leaf { .. } => panic!("expected an internal root"),
        }
    }

    #[test]
    fn test_leaf_wins_tie_against_later_merged_node() {
        // a, b merge into weight 2; c (weight 2) was queued before the merge and pops first.
        let tree = HuffmanTree::build(&table(&[(b'a', 1), (b'b', 1), (b'c', 2)])).unwrap();
        match tree.root() {
            Node::Internal { left, right, .. } => {
                assert!(matches!(**left, Node::Leaf { symbol: b'c', .. }));
                assert!(!right.is_leaf());
            }
            Node::Leaf { .. } => panic!("expected an internal root"),
        }
    }

    #[test]
    fn test_weights_and_depth() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"abracadabra")).unwrap();
        assert_eq!(tree.weight(), 11);
        assert_eq!(tree.leaf_count(), 5);
        assert!(tree.depth() >= 3);
    }

    proptest! {
        #[test]
        fn prop_build_is_deterministic(data in prop::collection::vec(any::<u8>(), 1..256)) {
            let freq = FrequencyTable::from_bytes(&data);
            let a = HuffmanTree::build(&freq).unwrap();
            let b = HuffmanTree::build(&freq.clone()).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.leaf_count(), freq.len());
            prop_assert_eq!(a.weight(), data.len() as u64);
        }
    }
}
