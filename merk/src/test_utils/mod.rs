// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Test utils

use rand::prelude::*;

use crate::tree::TreeNode;

/// Assert tree invariants
pub fn assert_tree_invariants(tree: &TreeNode) {
    assert!(tree.balance_factor().abs() < 2);

    if let Some(left) = tree.link(true) {
        assert!(left.key() < tree.key());
        assert_eq!(left.hash(), &left.tree().hash());
        assert_eq!(left.height(), left.tree().height());
    }

    if let Some(right) = tree.link(false) {
        assert!(right.key() > tree.key());
        assert_eq!(right.hash(), &right.tree().hash());
        assert_eq!(right.height(), right.tree().height());
    }

    if let Some(left) = tree.child(true) {
        assert_tree_invariants(left);
    }
    if let Some(right) = tree.child(false) {
        assert_tree_invariants(right);
    }
}

/// Format key to bytes
pub const fn seq_key(n: u64) -> [u8; 8] {
    n.to_be_bytes()
}

/// Create tree with initial fixed values and insert `node_count` random keys
/// drawn from a generator seeded with `seed`
pub fn make_tree_rand(node_count: u64, seed: u64) -> TreeNode {
    let mut rng: SmallRng = SeedableRng::seed_from_u64(seed);
    let value = vec![123; 60];

    let mut tree = TreeNode::new(vec![0; 20], value.clone());
    for _ in 0..node_count {
        let n = rng.gen::<u64>();
        tree = tree.put(seq_key(n).to_vec(), value.clone());
    }

    tree
}

/// Create tree with initial fixed values and insert `node_count` sequential
/// keys, starting from key 0
pub fn make_tree_seq(node_count: u64) -> TreeNode {
    let value = vec![123; 60];

    let mut tree = TreeNode::new(seq_key(0).to_vec(), value.clone());
    for n in 1..node_count {
        tree = tree.put(seq_key(n).to_vec(), value.clone());
    }

    tree
}
