//! Merk tree hash functions

use integer_encoding::VarInt;

/// The length of a `Hash` (in bytes).
pub const HASH_LENGTH: usize = 32;

/// A zero-filled `Hash`.
pub const NULL_HASH: CryptoHash = [0; HASH_LENGTH];

/// A cryptographic hash digest.
pub type CryptoHash = [u8; HASH_LENGTH];

fn finalize(hasher: blake3::Hasher) -> CryptoHash {
    let mut hash: CryptoHash = Default::default();
    hash.copy_from_slice(hasher.finalize().as_bytes());
    hash
}

/// Hashes a value
pub fn value_hash(value: &[u8]) -> CryptoHash {
    let mut hasher = blake3::Hasher::new();

    let val_length = value.len().encode_var_vec();
    hasher.update(val_length.as_slice());
    hasher.update(value);

    finalize(hasher)
}

/// Hashes a key/value pair.
///
/// The result is Hash(key_len, key, Hash(value_len, value))
pub fn kv_hash(key: &[u8], value: &[u8]) -> CryptoHash {
    kv_digest_to_kv_hash(key, &value_hash(value))
}

/// Computes the kv hash given a kv digest
pub fn kv_digest_to_kv_hash(key: &[u8], value_hash: &CryptoHash) -> CryptoHash {
    let mut hasher = blake3::Hasher::new();

    let key_length = key.len().encode_var_vec();
    hasher.update(key_length.as_slice());
    hasher.update(key);

    hasher.update(value_hash.as_slice());

    finalize(hasher)
}

/// Hashes a node based on the hash of its key/value pair, the hash of its left
/// child (if any), and the hash of its right child (if any).
pub fn node_hash(kv: &CryptoHash, left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(kv);
    hasher.update(left);
    hasher.update(right);

    finalize(hasher)
}
