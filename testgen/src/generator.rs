//! Fixture generator holding its own random source

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    error::Result,
    fixture::{self, FixtureResult, NonExistenceResult},
    options::FixtureOptions,
    position::{self, Where},
    store::ProvableStore,
    universe::{self, KeyUniverse},
};

/// Generates fixtures from an injected random source, so a seeded source
/// reproduces every key, value and selection exactly.
#[derive(Clone, Debug)]
pub struct FixtureGenerator<R> {
    rng: R,
    options: FixtureOptions,
}

impl FixtureGenerator<SmallRng> {
    /// Generator with default options and a `SmallRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FixtureGenerator<R> {
    /// Generator with default options drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self::with_options(rng, FixtureOptions::default())
    }

    /// Generator drawing from `rng` with custom options.
    pub fn with_options(rng: R, options: FixtureOptions) -> Self {
        Self { rng, options }
    }

    /// Options in use.
    pub fn options(&self) -> &FixtureOptions {
        &self.options
    }

    /// See [`universe::build_tree`].
    pub fn build_tree<S>(&mut self, size: usize) -> Result<(S, KeyUniverse)>
    where
        S: ProvableStore + Default,
    {
        universe::build_tree(size, &mut self.rng, &self.options)
    }

    /// See [`position::get_key`].
    pub fn get_key<'u>(&mut self, universe: &'u KeyUniverse, loc: Where) -> &'u [u8] {
        position::get_key(universe, loc, &mut self.rng)
    }

    /// See [`position::get_non_key`].
    pub fn get_non_key(&mut self, universe: &KeyUniverse, loc: Where) -> Vec<u8> {
        position::get_non_key(universe, loc, &mut self.rng)
    }

    /// See [`fixture::generate_result`].
    pub fn generate_result<S>(
        &mut self,
        size: usize,
        loc: Where,
    ) -> Result<FixtureResult<S::Proof>>
    where
        S: ProvableStore + Default,
    {
        fixture::generate_result::<S, R>(size, loc, &mut self.rng, &self.options)
    }

    /// See [`fixture::generate_non_existence_result`].
    pub fn generate_non_existence_result<S>(
        &mut self,
        size: usize,
        loc: Where,
    ) -> Result<NonExistenceResult<S::Proof>>
    where
        S: ProvableStore + Default,
    {
        fixture::generate_non_existence_result::<S, R>(size, loc, &mut self.rng, &self.options)
    }
}

#[cfg(test)]
mod test {
    use testgen_merk::Merk;

    use super::*;

    #[test]
    fn seeded_generators_agree() {
        let a = FixtureGenerator::seeded(42)
            .generate_result::<Merk>(25, Where::Middle)
            .unwrap();
        let b = FixtureGenerator::seeded(42)
            .generate_result::<Merk>(25, Where::Middle)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = FixtureGenerator::seeded(1)
            .generate_result::<Merk>(25, Where::Left)
            .unwrap();
        let b = FixtureGenerator::seeded(2)
            .generate_result::<Merk>(25, Where::Left)
            .unwrap();
        assert_ne!(a.root_hash, b.root_hash);
    }

    #[test]
    fn custom_options_flow_through() {
        let options = FixtureOptions {
            key_length: 8,
            value_prefix: b"v:".to_vec(),
        };
        let mut generator = FixtureGenerator::with_options(SmallRng::seed_from_u64(3), options);
        let result = generator.generate_result::<Merk>(5, Where::Right).unwrap();
        assert_eq!(result.key.len(), 8);
        assert_eq!(result.value, [&b"v:"[..], &result.key[..]].concat());
    }
}
