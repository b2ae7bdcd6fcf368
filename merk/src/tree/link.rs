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

//! Merk tree link

use super::{hash::CryptoHash, TreeNode};

/// Represents a reference to a child tree node. The child is always held in
/// memory, and the link caches its hash and the heights of its own children so
/// the parent can be hashed and balanced without descending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    hash: CryptoHash,
    child_heights: (u8, u8),
    tree: Box<TreeNode>,
}

impl Link {
    /// Creates a `Link` to the given tree, computing its hash.
    #[inline]
    pub fn from_tree(tree: TreeNode) -> Self {
        Self {
            hash: tree.hash(),
            child_heights: tree.child_heights(),
            tree: Box::new(tree),
        }
    }

    /// Creates a `Link` from an optional tree.
    #[inline]
    pub fn maybe_from_tree(maybe_tree: Option<TreeNode>) -> Option<Self> {
        maybe_tree.map(Self::from_tree)
    }

    /// Returns the key of the tree referenced by this link.
    #[inline]
    pub fn key(&self) -> &[u8] {
        self.tree.key()
    }

    /// Returns the hash of the tree referenced by this link.
    #[inline]
    pub const fn hash(&self) -> &CryptoHash {
        &self.hash
    }

    /// Returns a reference to the linked tree.
    #[inline]
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// Consumes the link and returns the linked tree.
    #[inline]
    pub fn into_tree(self) -> TreeNode {
        *self.tree
    }

    /// Returns the height of the tree referenced by the link. A leaf node has
    /// height 1.
    #[inline]
    pub const fn height(&self) -> u8 {
        let (left_height, right_height) = self.child_heights;
        1 + if left_height >= right_height {
            left_height
        } else {
            right_height
        }
    }

    /// Returns the balance factor of the tree referenced by the link.
    #[inline]
    pub const fn balance_factor(&self) -> i8 {
        let (left_height, right_height) = self.child_heights;
        right_height as i8 - left_height as i8
    }
}
