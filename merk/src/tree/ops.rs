//! Merk tree ops

use std::cmp::Ordering;

use super::TreeNode;

impl TreeNode {
    /// Inserts `key` with `value` into the tree rooted at `self`, replacing
    /// the value if the key already exists. Rebalances on the way back up and
    /// returns the new root.
    pub fn put(self, key: Vec<u8>, value: Vec<u8>) -> Self {
        let left = match key.as_slice().cmp(self.key()) {
            Ordering::Equal => return self.put_value(value),
            Ordering::Less => true,
            Ordering::Greater => false,
        };

        self.walk(left, |maybe_child| {
            Some(match maybe_child {
                Some(child) => child.put(key, value),
                None => TreeNode::new(key, value),
            })
        })
        .maybe_balance()
    }

    /// Checks if the tree is unbalanced and if so, applies AVL tree rotation(s)
    /// to rebalance the tree and its subtrees. Returns the root node of the
    /// balanced tree after applying the rotations.
    fn maybe_balance(self) -> Self {
        let balance_factor = self.balance_factor();
        if balance_factor.abs() <= 1 {
            return self;
        }

        let left = balance_factor < 0;

        // maybe do a double rotation
        let child_balance_factor = self.link(left).map_or(0, |link| link.balance_factor());
        let tree = if left == (child_balance_factor > 0) {
            self.walk_expect(left, |child| Some(child.rotate(!left)))
        } else {
            self
        };

        tree.rotate(left)
    }

    /// Applies an AVL tree rotation, a constant-time operation which only needs
    /// to swap pointers in order to rebalance a tree.
    fn rotate(self, left: bool) -> Self {
        let (tree, child) = self.detach_expect(left);
        let (child, maybe_grandchild) = child.detach(!left);

        // attach grandchild to self
        let tree = tree.attach(left, maybe_grandchild).maybe_balance();

        // attach self to child, return child
        child.attach(!left, Some(tree)).maybe_balance()
    }
}

#[cfg(feature = "test_utils")]
#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{assert_tree_invariants, make_tree_rand, make_tree_seq, seq_key};

    #[test]
    fn simple_insert() {
        let tree = TreeNode::new(vec![10], vec![123]).put(vec![11], vec![3]);

        assert_eq!(tree.key(), &[10]);
        assert!(tree.child(true).is_none());
        assert_eq!(tree.child(false).expect("expected child").key(), &[11]);
    }

    #[test]
    fn simple_update() {
        let tree = TreeNode::new(vec![10], vec![123]).put(vec![10], vec![234]);

        assert_eq!(tree.key(), &[10]);
        assert_eq!(tree.value_as_slice(), &[234]);
        assert!(tree.child(true).is_none());
        assert!(tree.child(false).is_none());
    }

    #[test]
    fn insert_rotates_right_leaning_run() {
        let tree = TreeNode::new(vec![1], vec![1])
            .put(vec![2], vec![2])
            .put(vec![3], vec![3]);

        assert_eq!(tree.key(), &[2]);
        assert_eq!(tree.child(true).expect("left").key(), &[1]);
        assert_eq!(tree.child(false).expect("right").key(), &[3]);
        assert_tree_invariants(&tree);
    }

    #[test]
    fn insert_double_rotation() {
        let tree = TreeNode::new(vec![3], vec![3])
            .put(vec![1], vec![1])
            .put(vec![2], vec![2]);

        assert_eq!(tree.key(), &[2]);
        assert_eq!(tree.height(), 2);
        assert_tree_invariants(&tree);
    }

    #[test]
    fn sequential_inserts_stay_balanced() {
        let tree = make_tree_seq(1_000);
        assert_tree_invariants(&tree);
        // a balanced tree of 1000 nodes has height at most 1.44 * log2(1000)
        assert!(tree.height() <= 14);
        assert_eq!(tree.get(&seq_key(500)), Some(&[123; 60][..]));
    }

    #[test]
    fn random_inserts_stay_balanced() {
        let tree = make_tree_rand(500, 1);
        assert_tree_invariants(&tree);

        let mut count = 0;
        tree.visit_kvs(&mut |_, _| count += 1);
        assert!(count > 1 && count <= 501);
    }
}
