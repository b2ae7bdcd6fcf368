//! Fixture generation options

/// Controls the shape of generated keys and values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureOptions {
    /// Length in bytes of every generated key. Keys are alphanumeric ASCII,
    /// so they always sort between the absent-key sentinels.
    pub key_length: usize,
    /// Prefix of every value; the value is this prefix followed by its key.
    pub value_prefix: Vec<u8>,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            key_length: 20,
            value_prefix: b"value_for_".to_vec(),
        }
    }
}

impl FixtureOptions {
    /// Derives the value stored under `key`.
    pub fn value_for_key(&self, key: &[u8]) -> Vec<u8> {
        let mut value = Vec::with_capacity(self.value_prefix.len() + key.len());
        value.extend_from_slice(&self.value_prefix);
        value.extend_from_slice(key);
        value
    }
}
