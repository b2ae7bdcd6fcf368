//! Assembling proof fixtures

use rand::Rng;
use tracing::debug;

use crate::{
    error::{Error, Result},
    options::FixtureOptions,
    position::{get_key, get_non_key, Where},
    store::{LeafProof, ProvableStore},
    universe::build_tree,
};

/// A proof that a key is present, with everything needed to check it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureResult<P> {
    /// Proven key
    pub key: Vec<u8>,
    /// Value stored under `key`
    pub value: Vec<u8>,
    /// Proof attesting exactly the pair `key`/`value`
    pub proof: P,
    /// Root hash of the tree the proof was made against
    pub root_hash: Vec<u8>,
}

/// A proof that a key is absent, with everything needed to check it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonExistenceResult<P> {
    /// Key shown to be absent
    pub key: Vec<u8>,
    /// Proof attesting the neighbours of `key`
    pub proof: P,
    /// Root hash of the tree the proof was made against
    pub root_hash: Vec<u8>,
}

/// Builds a tree of `size` random keys and proves the key at `loc`.
///
/// Fails with `ValueMissing` if the store has no value for a key it was just
/// given, with `UnexpectedProofShape` if the proof does not attest exactly one
/// leaf, and with `UnexpectedLeaf` if that leaf is not the proven pair. Store
/// errors are returned as they are.
///
/// # Panics
///
/// Panics if `loc` is `Middle` and the tree holds fewer than three keys.
pub fn generate_result<S, R>(
    size: usize,
    loc: Where,
    rng: &mut R,
    options: &FixtureOptions,
) -> Result<FixtureResult<S::Proof>>
where
    S: ProvableStore + Default,
    R: Rng + ?Sized,
{
    let (store, universe) = build_tree::<S, R>(size, rng, options)?;
    let key = get_key(&universe, loc, rng).to_vec();

    let (value, proof) = store.get_with_proof(&key)?;
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            return Err(Error::ValueMissing(format!(
                "store returned no value for inserted key {}",
                hex::encode(&key)
            )))
        }
    };
    let leaves = proof.leaves();
    if leaves.len() != 1 {
        return Err(Error::UnexpectedProofShape(leaves.len()));
    }
    if leaves[0] != (key.as_slice(), value.as_slice()) {
        return Err(Error::UnexpectedLeaf(format!(
            "proof for key {} attests key {}",
            hex::encode(&key),
            hex::encode(leaves[0].0)
        )));
    }

    let root_hash = store.root_hash();
    debug!(
        size,
        %loc,
        key = %hex::encode(&key),
        root_hash = %hex::encode(&root_hash),
        "generated fixture"
    );

    Ok(FixtureResult {
        key,
        value,
        proof,
        root_hash,
    })
}

/// Builds a tree of `size` random keys and proves the absence of the
/// non-key at `loc`.
///
/// Fails with `UnexpectedValue` if the chosen key turns out to be present,
/// with `UnexpectedProofShape` unless the proof attests one or two
/// neighbouring leaves, and with `UnexpectedLeaf` if one of them is the key
/// itself.
///
/// # Panics
///
/// Panics if `loc` is `Middle` and the tree holds fewer than three keys.
pub fn generate_non_existence_result<S, R>(
    size: usize,
    loc: Where,
    rng: &mut R,
    options: &FixtureOptions,
) -> Result<NonExistenceResult<S::Proof>>
where
    S: ProvableStore + Default,
    R: Rng + ?Sized,
{
    let (store, universe) = build_tree::<S, R>(size, rng, options)?;
    let key = get_non_key(&universe, loc, rng);

    // middle non-keys are only probably absent
    if universe.contains(&key) {
        return Err(Error::UnexpectedValue(format!(
            "non-key {} collides with a generated key",
            hex::encode(&key)
        )));
    }

    let (value, proof) = store.get_with_proof(&key)?;
    if value.is_some() {
        return Err(Error::UnexpectedValue(format!(
            "store returned a value for absent key {}",
            hex::encode(&key)
        )));
    }
    let leaves = proof.leaves();
    if !(1..=2).contains(&leaves.len()) {
        return Err(Error::UnexpectedProofShape(leaves.len()));
    }
    if leaves.iter().any(|(leaf_key, _)| *leaf_key == key.as_slice()) {
        return Err(Error::UnexpectedLeaf(format!(
            "proof of absence attests key {}",
            hex::encode(&key)
        )));
    }

    let root_hash = store.root_hash();
    debug!(
        size,
        %loc,
        key = %hex::encode(&key),
        root_hash = %hex::encode(&root_hash),
        "generated non-existence fixture"
    );

    Ok(NonExistenceResult {
        key,
        proof,
        root_hash,
    })
}
