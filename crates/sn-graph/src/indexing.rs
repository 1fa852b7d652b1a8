//! String id to arena index lookup.

use std::collections::HashMap;

use sn_core::Id;

/// Maps the stable string ids of nodes or links to their current arena index.
///
/// Rebuilt from scratch whenever the arena is compacted.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    map: HashMap<String, Id>,
}

impl IdIndex {
    /// Build from ids in arena order. Returns the first duplicate on failure.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<Self, String> {
        let mut index = Self::default();
        for (i, id) in ids.into_iter().enumerate() {
            if !index.insert(id, Id::from_index(i)) {
                return Err(id.to_string());
            }
        }
        Ok(index)
    }

    /// Insert a new id. Returns false (and leaves the map untouched) if it exists.
    pub fn insert(&mut self, id: &str, idx: Id) -> bool {
        if self.map.contains_key(id) {
            return false;
        }
        self.map.insert(id.to_string(), idx);
        true
    }

    pub fn get(&self, id: &str) -> Option<Id> {
        self.map.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
