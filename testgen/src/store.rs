//! Capabilities fixture generation needs from a provable key/value store

use testgen_merk::{Merk, RangeProof};

use crate::error::{Error, Result};

/// A proof returned by a store lookup.
pub trait LeafProof {
    /// Key/value pairs the proof attests, in ascending key order.
    fn leaves(&self) -> Vec<(&[u8], &[u8])>;

    /// Number of key/value pairs the proof attests.
    fn leaf_count(&self) -> usize {
        self.leaves().len()
    }
}

/// An ordered key/value store which can prove lookups against its root hash.
///
/// Fixture generation only ever inserts, looks up with a proof and reads the
/// root hash, so that is all a store has to offer.
pub trait ProvableStore {
    /// Proof produced by `get_with_proof`.
    type Proof: LeafProof;

    /// Inserts a key/value pair. Inserting an existing key must not add a
    /// second entry.
    fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    /// Looks up `key` and proves the result, whether the key is present or
    /// not.
    fn get_with_proof(&self, key: &[u8]) -> Result<(Option<Vec<u8>>, Self::Proof)>;

    /// Digest of the store's current contents.
    fn root_hash(&self) -> Vec<u8>;
}

impl LeafProof for RangeProof {
    fn leaves(&self) -> Vec<(&[u8], &[u8])> {
        RangeProof::leaves(self).collect()
    }

    fn leaf_count(&self) -> usize {
        RangeProof::leaf_count(self)
    }
}

impl ProvableStore for Merk {
    type Proof = RangeProof;

    fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.put(key, value).map_err(Error::MerkError)
    }

    fn get_with_proof(&self, key: &[u8]) -> Result<(Option<Vec<u8>>, Self::Proof)> {
        Merk::get_with_proof(self, key).map_err(Error::MerkError)
    }

    fn root_hash(&self) -> Vec<u8> {
        Merk::root_hash(self).to_vec()
    }
}
