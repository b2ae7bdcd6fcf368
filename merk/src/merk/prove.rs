use super::Merk;
use crate::{
    error::{Error, Result},
    proofs::RangeProof,
};

impl Merk {
    /// Creates a proof for `key`. A present key is attested by a single leaf;
    /// an absent key by the one or two leaves neighbouring the gap it falls
    /// into. The proof commits to the current `root_hash`.
    pub fn prove(&self, key: &[u8]) -> RangeProof {
        match &self.tree {
            Some(tree) => RangeProof::new(tree.create_proof(key).0),
            None => RangeProof::default(),
        }
    }

    /// Gets the value for `key` together with a proof of it, or of its
    /// absence.
    pub fn get_with_proof(&self, key: &[u8]) -> Result<(Option<Vec<u8>>, RangeProof)> {
        let value = self.get(key);
        let proof = self.prove(key);

        if value.is_some() && proof.leaf_count() != 1 {
            return Err(Error::ProofCreationError(format!(
                "proof for present key {} attests {} leaves",
                hex::encode(key),
                proof.leaf_count()
            )));
        }

        Ok((value, proof))
    }
}
