//! Merk proofs

pub mod encoding;
mod query;
pub mod tree;

pub use encoding::{encode_into, Decoder};
pub use tree::{execute_proof, verify_proof};

use crate::{
    error::Result,
    tree::{CryptoHash, NULL_HASH},
};

/// A proof operator, executed to verify the data in a Merkle proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Pushes a node on the stack.
    Push(Node),

    /// Pops the top stack item as `parent`. Pops the next top stack item as
    /// `child`. Attaches `child` as the left child of `parent`. Pushes the
    /// updated `parent` back on the stack.
    Parent,

    /// Pops the top stack item as `child`. Pops the next top stack item as
    /// `parent`. Attaches `child` as the right child of `parent`. Pushes the
    /// updated `parent` back on the stack.
    Child,
}

/// A selected piece of data about a single tree node, to be contained in a
/// `Push` operator in a proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Represents the hash of a tree node.
    Hash(CryptoHash),

    /// Represents the hash of the key/value pair of a tree node.
    KVHash(CryptoHash),

    /// Represents the key and value of a tree node.
    KV(Vec<u8>, Vec<u8>),
}

/// A proof for a single key lookup.
///
/// Attests either the key/value pair of the looked-up key, or, when the key
/// is absent, the key/value pairs of its in-order neighbours. Each attested
/// pair is a leaf of the proof.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeProof {
    /// Operators, in execution order
    pub ops: Vec<Op>,
}

impl RangeProof {
    /// Wraps proof operators.
    pub const fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// Key/value pairs attested by the proof, in ascending key order.
    pub fn leaves(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.ops.iter().filter_map(|op| match op {
            Op::Push(Node::KV(key, value)) => Some((key.as_slice(), value.as_slice())),
            _ => None,
        })
    }

    /// Number of key/value pairs attested by the proof.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Executes the proof and returns the root hash it commits to. An empty
    /// proof, as produced by an empty tree, commits to `NULL_HASH`.
    pub fn root_hash(&self) -> Result<CryptoHash> {
        if self.ops.is_empty() {
            return Ok(NULL_HASH);
        }
        tree::execute(self.ops.iter().cloned().map(Ok), |_| Ok(())).map(|tree| tree.hash())
    }

    /// Serializes the proof operators.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(128);
        encode_into(self.ops.iter(), &mut bytes)?;
        Ok(bytes)
    }

    /// Deserializes proof operators produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Decoder::new(bytes).collect::<Result<Vec<_>>>().map(Self::new)
    }
}
