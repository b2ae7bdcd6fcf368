//! Populating a store with random keys

use rand::{distributions::Alphanumeric, Rng};
use tracing::debug;

use crate::{
    error::{Error, Result},
    options::FixtureOptions,
    store::ProvableStore,
};

/// The keys present in a generated store, sorted ascending by byte order and
/// without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyUniverse {
    keys: Vec<Vec<u8>>,
}

impl KeyUniverse {
    /// Sorts and deduplicates `keys`.
    pub fn from_keys(mut keys: Vec<Vec<u8>>) -> Self {
        keys.sort_unstable();
        keys.dedup();
        Self { keys }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at `index` in ascending order.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.keys.get(index).map(Vec::as_slice)
    }

    /// Smallest key.
    pub fn first(&self) -> Option<&[u8]> {
        self.keys.first().map(Vec::as_slice)
    }

    /// Largest key.
    pub fn last(&self) -> Option<&[u8]> {
        self.keys.last().map(Vec::as_slice)
    }

    /// Binary searches for `key`.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.position(key).is_some()
    }

    /// Index of `key` in ascending order, if present.
    pub fn position(&self, key: &[u8]) -> Option<usize> {
        self.keys
            .binary_search_by(|probe| probe.as_slice().cmp(key))
            .ok()
    }

    /// All keys, ascending.
    pub fn as_slice(&self) -> &[Vec<u8>] {
        &self.keys
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.keys.iter().map(Vec::as_slice)
    }
}

/// Generates a random alphanumeric key of `options.key_length` bytes.
fn random_key<R: Rng + ?Sized>(rng: &mut R, options: &FixtureOptions) -> Vec<u8> {
    rng.sample_iter(&Alphanumeric)
        .take(options.key_length)
        .collect()
}

/// Creates a fresh store and inserts `size` random keys, each with the value
/// derived from it by `options`. Returns the store together with the sorted
/// keys it holds.
///
/// Random keys may collide; the store keeps a single entry per key, so the
/// universe can be shorter than `size`.
pub fn build_tree<S, R>(
    size: usize,
    rng: &mut R,
    options: &FixtureOptions,
) -> Result<(S, KeyUniverse)>
where
    S: ProvableStore + Default,
    R: Rng + ?Sized,
{
    if size == 0 {
        return Err(Error::InvalidInputError("tree size must be positive"));
    }

    let mut store = S::default();
    let mut keys = Vec::with_capacity(size);
    for _ in 0..size {
        let key = random_key(rng, options);
        let value = options.value_for_key(&key);
        store.insert(key.clone(), value)?;
        keys.push(key);
    }

    let universe = KeyUniverse::from_keys(keys);
    debug!(size, keys = universe.len(), "built key universe");

    Ok((store, universe))
}
