//! Single-key proof generation

use std::cmp::Ordering;

use super::{Node, Op};
use crate::tree::TreeNode;

impl TreeNode {
    pub(crate) fn to_kv_node(&self) -> Node {
        Node::KV(self.key().to_vec(), self.value_as_slice().to_vec())
    }

    pub(crate) fn to_kvhash_node(&self) -> Node {
        Node::KVHash(*self.kv_hash())
    }

    /// Generates a proof for `key`. Returns the generated proof operators,
    /// and a tuple representing if the key was less than the left edge or
    /// greater than the right edge of this subtree, respectively.
    ///
    /// A present key is pushed as a `KV` node. For an absent key the nodes
    /// bounding the gap it falls into are pushed as `KV` nodes, so the proof
    /// shows the key has no place in the tree.
    pub(crate) fn create_proof(&self, key: &[u8]) -> (Vec<Op>, (bool, bool)) {
        let search = key.cmp(self.key());

        let (mut proof, left_absence) = self.create_child_proof(true, search.is_lt(), key);
        let (mut right_proof, right_absence) =
            self.create_child_proof(false, search.is_gt(), key);

        let (has_left, has_right) = (!proof.is_empty(), !right_proof.is_empty());

        proof.push(match search {
            Ordering::Equal => Op::Push(self.to_kv_node()),
            _ if left_absence.1 || right_absence.0 => Op::Push(self.to_kv_node()),
            _ => Op::Push(self.to_kvhash_node()),
        });

        if has_left {
            proof.push(Op::Parent);
        }

        if has_right {
            proof.append(&mut right_proof);
            proof.push(Op::Child);
        }

        (proof, (left_absence.0, right_absence.1))
    }

    /// Similar to `create_proof`. Recurses into the child on the given side if
    /// the key is on that side, otherwise prunes the child to its hash.
    fn create_child_proof(&self, left: bool, queried: bool, key: &[u8]) -> (Vec<Op>, (bool, bool)) {
        if queried {
            match self.child(left) {
                Some(child) => child.create_proof(key),
                None => (vec![], (true, true)),
            }
        } else if let Some(link) = self.link(left) {
            (vec![Op::Push(Node::Hash(*link.hash()))], (false, false))
        } else {
            (vec![], (false, false))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_3_node_tree() -> TreeNode {
        TreeNode::new(vec![5], vec![5])
            .attach(true, Some(TreeNode::new(vec![3], vec![3])))
            .attach(false, Some(TreeNode::new(vec![7], vec![7])))
    }

    #[test]
    fn root_proof() {
        let tree = make_3_node_tree();
        let (proof, absence) = tree.create_proof(&[5]);

        let left_hash = tree.child(true).unwrap().hash();
        let right_hash = tree.child(false).unwrap().hash();
        assert_eq!(
            proof,
            vec![
                Op::Push(Node::Hash(left_hash)),
                Op::Push(Node::KV(vec![5], vec![5])),
                Op::Parent,
                Op::Push(Node::Hash(right_hash)),
                Op::Child,
            ]
        );
        assert_eq!(absence, (false, false));
    }

    #[test]
    fn leaf_proof() {
        let tree = make_3_node_tree();
        let (proof, absence) = tree.create_proof(&[3]);

        let right_hash = tree.child(false).unwrap().hash();
        assert_eq!(
            proof,
            vec![
                Op::Push(Node::KV(vec![3], vec![3])),
                Op::Push(Node::KVHash(*tree.kv_hash())),
                Op::Parent,
                Op::Push(Node::Hash(right_hash)),
                Op::Child,
            ]
        );
        assert_eq!(absence, (false, false));
    }

    #[test]
    fn absent_key_between_nodes() {
        let tree = make_3_node_tree();
        let (proof, _) = tree.create_proof(&[4]);

        // both neighbours are revealed
        let leaves: Vec<_> = proof
            .iter()
            .filter_map(|op| match op {
                Op::Push(Node::KV(key, _)) => Some(key.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(leaves, vec![vec![3], vec![5]]);
    }

    #[test]
    fn absent_key_left_edge() {
        let tree = make_3_node_tree();
        let (proof, absence) = tree.create_proof(&[1]);

        assert_eq!(proof[0], Op::Push(Node::KV(vec![3], vec![3])));
        assert_eq!(absence, (true, false));
    }

    #[test]
    fn absent_key_right_edge() {
        let tree = make_3_node_tree();
        let (proof, absence) = tree.create_proof(&[9]);

        assert_eq!(
            proof.iter().rev().nth(1),
            Some(&Op::Push(Node::KV(vec![7], vec![7])))
        );
        assert_eq!(absence, (false, true));
    }
}
