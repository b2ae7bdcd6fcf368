use super::Merk;

impl Merk {
    /// Gets a value for the given key. If the key is not found, `None` is
    /// returned.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.tree
            .as_ref()
            .and_then(|tree| tree.get(key))
            .map(<[u8]>::to_vec)
    }
}
