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

//! Merk

mod get;
mod prove;

use crate::{
    error::{Error, Result},
    tree::{CryptoHash, TreeNode, NULL_HASH},
};

/// Longest key a proof can carry, as its length is encoded in one byte.
pub const MAX_KEY_LENGTH: usize = u8::MAX as usize;
/// Longest value a proof can carry, as its length is encoded in two bytes.
pub const MAX_VALUE_LENGTH: usize = u16::MAX as usize;

/// A handle to a Merkle key/value store, held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct Merk {
    pub(crate) tree: Option<TreeNode>,
    len: usize,
}

impl Merk {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` with `value`. An existing key has its value replaced, so
    /// the store never holds duplicate keys.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidInputError("key must not be empty"));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(Error::InvalidInputError("key is too long for a proof"));
        }
        if value.len() > MAX_VALUE_LENGTH {
            return Err(Error::InvalidInputError("value is too long for a proof"));
        }

        self.tree = Some(match self.tree.take() {
            Some(tree) => {
                if tree.get(&key).is_none() {
                    self.len += 1;
                }
                tree.put(key, value)
            }
            None => {
                self.len = 1;
                TreeNode::new(key, value)
            }
        });

        Ok(())
    }

    /// Returns the root hash of the tree (a digest for the entire store which
    /// proofs can be checked against). If the tree is empty, returns the null
    /// hash (zero-filled).
    pub fn root_hash(&self) -> CryptoHash {
        self.tree.as_ref().map_or(NULL_HASH, TreeNode::hash)
    }

    /// Returns the number of keys in the store.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the store holds no keys.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns all keys in ascending order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(tree) = &self.tree {
            tree.visit_kvs(&mut |key, _| keys.push(key.to_vec()));
        }
        keys
    }
}
