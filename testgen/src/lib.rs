//! Generates fixtures for testing Merkle proof verifiers.
//!
//! A fixture is a tree of random keys, a proof for one key chosen by its
//! position in sorted order, and the tree's root hash:
//!
//! ```
//! use merk_testgen::{generate_merk_result, Where};
//!
//! let fixture = generate_merk_result(10, Where::Left).unwrap();
//! assert_eq!(fixture.proof.leaf_count(), 1);
//! assert_eq!(fixture.proof.root_hash().unwrap().to_vec(), fixture.root_hash);
//! ```
//!
//! Trees are built through the [`ProvableStore`] trait, implemented for
//! [`Merk`](testgen_merk::Merk). Randomness is always injected; use
//! [`FixtureGenerator::seeded`] for reproducible output.

/// Error and Result types.
mod error;
/// Assembling fixtures.
pub mod fixture;
/// Generator owning its random source.
mod generator;
/// Fixture options.
mod options;
/// Selecting keys by position.
pub mod position;
/// Store capabilities.
pub mod store;
/// Populating stores.
pub mod universe;

pub use error::{Error, Result};
pub use fixture::{
    generate_non_existence_result, generate_result, FixtureResult, NonExistenceResult,
};
pub use generator::FixtureGenerator;
pub use options::FixtureOptions;
pub use position::{get_key, get_non_key, Where};
pub use store::{LeafProof, ProvableStore};
use testgen_merk::{Merk, RangeProof};
pub use universe::{build_tree, KeyUniverse};

/// Builds a Merk of `size` random keys and proves the key at `loc`, drawing
/// from the thread-local random source.
pub fn generate_merk_result(size: usize, loc: Where) -> Result<FixtureResult<RangeProof>> {
    generate_result::<Merk, _>(size, loc, &mut rand::thread_rng(), &FixtureOptions::default())
}

/// Builds a Merk of `size` random keys and proves the absence of the non-key
/// at `loc`, drawing from the thread-local random source.
pub fn generate_merk_non_existence_result(
    size: usize,
    loc: Where,
) -> Result<NonExistenceResult<RangeProof>> {
    generate_non_existence_result::<Merk, _>(
        size,
        loc,
        &mut rand::thread_rng(),
        &FixtureOptions::default(),
    )
}
