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

//! Merk trees

mod hash;
pub mod kv;
mod link;
mod ops;

use std::cmp::{max, Ordering};

pub use hash::{
    kv_digest_to_kv_hash, kv_hash, node_hash, value_hash, CryptoHash, HASH_LENGTH, NULL_HASH,
};
use kv::KV;
pub use link::Link;

/// A binary AVL tree data structure, with Merkle hashes.
///
/// Children are held behind `Link`s, which cache the child's hash, so hashing
/// a node never recurses. Nodes are detached from and reattached to their
/// parents by value while the tree is being modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub(crate) kv: KV,
    pub(crate) left: Option<Link>,
    pub(crate) right: Option<Link>,
}

impl TreeNode {
    /// Creates a new `TreeNode` with the given key and value, and no children.
    ///
    /// Hashes the key/value pair and initializes the `kv_hash` field.
    pub fn new(key: Vec<u8>, value: Vec<u8>) -> Self {
        Self {
            kv: KV::new(key, value),
            left: None,
            right: None,
        }
    }

    /// Returns the root node's key as a slice.
    #[inline]
    pub fn key(&self) -> &[u8] {
        self.kv.key()
    }

    /// Returns the root node's value as a slice.
    #[inline]
    pub fn value_as_slice(&self) -> &[u8] {
        self.kv.value_as_slice()
    }

    /// Returns the hash of the root node's key/value pair.
    #[inline]
    pub const fn kv_hash(&self) -> &CryptoHash {
        self.kv.hash()
    }

    /// Computes and returns the hash of the root node.
    #[inline]
    pub fn hash(&self) -> CryptoHash {
        node_hash(self.kv_hash(), self.child_hash(true), self.child_hash(false))
    }

    /// Returns a reference to the root node's `Link` on the given side, if
    /// any.
    #[inline]
    pub const fn link(&self, left: bool) -> Option<&Link> {
        if left {
            self.left.as_ref()
        } else {
            self.right.as_ref()
        }
    }

    /// Returns a mutable reference to the root node's `Link` slot on the given
    /// side.
    #[inline]
    fn slot_mut(&mut self, left: bool) -> &mut Option<Link> {
        if left {
            &mut self.left
        } else {
            &mut self.right
        }
    }

    /// Returns a reference to the root node's child on the given side, if any.
    #[inline]
    pub fn child(&self, left: bool) -> Option<&Self> {
        self.link(left).map(Link::tree)
    }

    /// Returns the hash of the root node's child on the given side, if any. If
    /// there is no child, returns the null hash (zero-filled).
    #[inline]
    pub fn child_hash(&self, left: bool) -> &CryptoHash {
        self.link(left).map_or(&NULL_HASH, Link::hash)
    }

    /// Returns the height of the child on the given side, if any. If there is
    /// no child, returns 0.
    #[inline]
    pub fn child_height(&self, left: bool) -> u8 {
        self.link(left).map_or(0, Link::height)
    }

    /// Return the child heights of self
    #[inline]
    pub fn child_heights(&self) -> (u8, u8) {
        (self.child_height(true), self.child_height(false))
    }

    /// Returns the height of the tree (the number of levels). For example, a
    /// single node has height 1, a node with a single descendant has height 2,
    /// etc.
    #[inline]
    pub fn height(&self) -> u8 {
        1 + max(self.child_height(true), self.child_height(false))
    }

    /// Returns the balance factor of the root node. This is the difference
    /// between the height of the right child (if any) and the height of the
    /// left child (if any). For example, a balance factor of 2 means the right
    /// subtree is 2 levels taller than the left subtree.
    #[inline]
    pub fn balance_factor(&self) -> i8 {
        let left_height = self.child_height(true) as i8;
        let right_height = self.child_height(false) as i8;
        right_height - left_height
    }

    /// Attaches the child (if any) to the root node on the given side.
    ///
    /// Panics if there is already a child on the given side.
    #[inline]
    pub fn attach(mut self, left: bool, maybe_child: Option<Self>) -> Self {
        debug_assert_ne!(
            Some(self.key()),
            maybe_child.as_ref().map(|c| c.key()),
            "Tried to attach tree with same key"
        );

        let slot = self.slot_mut(left);

        if slot.is_some() {
            panic!(
                "Tried to attach to {} tree slot, but it is already Some",
                side_to_str(left)
            );
        }
        *slot = Link::maybe_from_tree(maybe_child);

        self
    }

    /// Detaches the child on the given side (if any) from the root node, and
    /// returns `(root_node, maybe_child)`.
    ///
    /// One will usually want to reattach (see `attach`) a child on the same
    /// side after applying some operation to the detached child.
    #[inline]
    pub fn detach(mut self, left: bool) -> (Self, Option<Self>) {
        let maybe_child = self.slot_mut(left).take().map(Link::into_tree);
        (self, maybe_child)
    }

    /// Detaches the child on the given side from the root node, and
    /// returns `(root_node, child)`.
    ///
    /// Panics if there is no child on the given side.
    #[inline]
    pub fn detach_expect(self, left: bool) -> (Self, Self) {
        let (parent, maybe_child) = self.detach(left);

        if let Some(child) = maybe_child {
            (parent, child)
        } else {
            panic!(
                "Expected tree to have {} child, but got None",
                side_to_str(left)
            );
        }
    }

    /// Detaches the child on the given side and passes it into `f`, which must
    /// return a new child (either the same child, a new child to take its
    /// place, or `None` to explicitly keep the slot empty).
    #[inline]
    pub fn walk<F>(self, left: bool, f: F) -> Self
    where
        F: FnOnce(Option<Self>) -> Option<Self>,
    {
        let (tree, maybe_child) = self.detach(left);
        tree.attach(left, f(maybe_child))
    }

    /// Like `walk`, but panics if there is no child on the given side.
    #[inline]
    pub fn walk_expect<F>(self, left: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Option<Self>,
    {
        let (tree, child) = self.detach_expect(left);
        tree.attach(left, f(child))
    }

    /// Replaces the root node's value with the given value and returns the
    /// modified `TreeNode`.
    #[inline]
    pub fn put_value(mut self, value: Vec<u8>) -> Self {
        self.kv = self.kv.put_value_then_update(value);
        self
    }

    /// Looks up `key` by descending from the root. Returns the value if the
    /// key is in the tree.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let mut cursor = self;
        loop {
            let left = match key.cmp(cursor.key()) {
                Ordering::Equal => return Some(cursor.value_as_slice()),
                Ordering::Less => true,
                Ordering::Greater => false,
            };
            cursor = cursor.child(left)?;
        }
    }

    /// Does an in-order traversal over the tree, calling `visit` with each
    /// key/value pair.
    pub fn visit_kvs<F: FnMut(&[u8], &[u8])>(&self, visit: &mut F) {
        if let Some(left) = self.child(true) {
            left.visit_kvs(visit);
        }
        visit(self.key(), self.value_as_slice());
        if let Some(right) = self.child(false) {
            right.visit_kvs(visit);
        }
    }
}

/// Convert side (left or right) to string
pub const fn side_to_str(left: bool) -> &'static str {
    if left {
        "left"
    } else {
        "right"
    }
}

#[cfg(test)]
mod test {
    use super::{hash::NULL_HASH, TreeNode};

    #[test]
    fn build_tree() {
        let tree = TreeNode::new(vec![1], vec![101]);
        assert_eq!(tree.key(), &[1]);
        assert_eq!(tree.value_as_slice(), &[101]);
        assert!(tree.child(true).is_none());
        assert!(tree.child(false).is_none());

        let tree = tree.attach(true, None);
        assert!(tree.child(true).is_none());
        assert!(tree.child(false).is_none());

        let tree = tree.attach(true, Some(TreeNode::new(vec![2], vec![102])));
        assert_eq!(tree.key(), &[1]);
        assert_eq!(tree.child(true).unwrap().key(), &[2]);
        assert!(tree.child(false).is_none());

        let tree = TreeNode::new(vec![3], vec![103]).attach(false, Some(tree));
        assert_eq!(tree.key(), &[3]);
        assert_eq!(tree.child(false).unwrap().key(), &[1]);
        assert!(tree.child(true).is_none());
    }

    #[should_panic]
    #[test]
    fn attach_existing() {
        TreeNode::new(vec![0], vec![1])
            .attach(true, Some(TreeNode::new(vec![2], vec![3])))
            .attach(true, Some(TreeNode::new(vec![4], vec![5])));
    }

    #[test]
    fn modify() {
        let tree = TreeNode::new(vec![0], vec![1])
            .attach(true, Some(TreeNode::new(vec![2], vec![3])))
            .attach(false, Some(TreeNode::new(vec![4], vec![5])));

        let tree = tree.walk(true, |left_opt| {
            assert_eq!(left_opt.as_ref().unwrap().key(), &[2]);
            None
        });
        assert!(tree.child(true).is_none());
        assert!(tree.child(false).is_some());

        let tree = tree.walk(true, |left_opt| {
            assert!(left_opt.is_none());
            Some(TreeNode::new(vec![2], vec![3]))
        });
        assert_eq!(tree.link(true).unwrap().key(), &[2]);

        let tree = tree.walk_expect(false, |right| {
            assert_eq!(right.key(), &[4]);
            None
        });
        assert!(tree.child(true).is_some());
        assert!(tree.child(false).is_none());
    }

    #[test]
    fn child_hash() {
        let child = TreeNode::new(vec![2], vec![3]);
        let child_hash = child.hash();
        let tree = TreeNode::new(vec![0], vec![1]).attach(true, Some(child));

        assert_eq!(tree.child_hash(true), &child_hash);
        assert_eq!(tree.child_hash(false), &NULL_HASH);
    }

    #[test]
    fn hash_changes_with_children_and_values() {
        let leaf = TreeNode::new(vec![0], vec![1]);
        let leaf_hash = leaf.hash();
        assert_ne!(leaf_hash, NULL_HASH);

        let with_child = leaf.attach(false, Some(TreeNode::new(vec![2], vec![3])));
        assert_ne!(with_child.hash(), leaf_hash);

        let updated = with_child.clone().put_value(vec![9]);
        assert_eq!(updated.value_as_slice(), &[9]);
        assert_ne!(updated.hash(), with_child.hash());
    }

    #[test]
    fn height_and_balance() {
        let tree = TreeNode::new(vec![0], vec![1]);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.child_height(true), 0);
        assert_eq!(tree.child_height(false), 0);
        assert_eq!(tree.balance_factor(), 0);

        let tree = tree.attach(true, Some(TreeNode::new(vec![2], vec![3])));
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.child_height(true), 1);
        assert_eq!(tree.child_height(false), 0);
        assert_eq!(tree.balance_factor(), -1);

        let (tree, maybe_child) = tree.detach(true);
        let tree = tree.attach(false, maybe_child);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.child_height(true), 0);
        assert_eq!(tree.child_height(false), 1);
        assert_eq!(tree.balance_factor(), 1);
    }

    #[test]
    fn get_descends_to_key() {
        let tree = TreeNode::new(vec![5], vec![50])
            .attach(true, Some(TreeNode::new(vec![3], vec![30])))
            .attach(false, Some(TreeNode::new(vec![7], vec![70])));

        assert_eq!(tree.get(&[5]), Some(&[50][..]));
        assert_eq!(tree.get(&[3]), Some(&[30][..]));
        assert_eq!(tree.get(&[7]), Some(&[70][..]));
        assert_eq!(tree.get(&[4]), None);
        assert_eq!(tree.get(&[8]), None);
    }

    #[test]
    fn visit_kvs_in_order() {
        let tree = TreeNode::new(vec![5], vec![50])
            .attach(true, Some(TreeNode::new(vec![3], vec![30])))
            .attach(false, Some(TreeNode::new(vec![7], vec![70])));

        let mut keys = vec![];
        tree.visit_kvs(&mut |key, _| keys.push(key.to_vec()));
        assert_eq!(keys, vec![vec![3], vec![5], vec![7]]);
    }
}
