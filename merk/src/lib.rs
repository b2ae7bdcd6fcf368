//! In-memory Merkle AVL key/value tree with single-key range proofs.
//!
//! The tree hashes every node as `H(kv_hash, left_hash, right_hash)` so the
//! root hash commits to the whole key/value content. Proofs are sequences of
//! stack operators which a verifier executes to rebuild the root hash.

/// Error and Result types.
mod error;
/// The top-level store API.
pub mod merk;
/// Algorithms for generating and executing Merkle proofs.
pub mod proofs;
/// Various helpers useful for tests.
#[cfg(feature = "test_utils")]
pub mod test_utils;
/// The core tree data structure.
pub mod tree;

pub use error::{Error, Result};
pub use proofs::{execute_proof, verify_proof, RangeProof};
pub use tree::{CryptoHash, TreeNode, HASH_LENGTH, NULL_HASH};

pub use crate::merk::Merk;
