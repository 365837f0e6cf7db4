// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

/// A map from original names to scoped ones.
#[derive(Clone, Default, Debug)]
pub struct NameMap(HashMap<String, String>);

/// Element IDs renamed inside a single `svg` element.
pub type IdMapping = NameMap;

/// Classes renamed by a single `style` element.
pub type ClassMapping = NameMap;

impl NameMap {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        NameMap::default()
    }

    /// Inserts a name pair.
    ///
    /// Replaces an existing pair with the same original name.
    pub fn insert(&mut self, from: &str, to: String) {
        self.0.insert(from.to_string(), to);
    }

    /// Inserts all pairs from another map.
    ///
    /// Pairs of `other` replace existing ones.
    pub fn extend(&mut self, other: &NameMap) {
        for (from, to) in other.iter() {
            self.insert(from, to.to_string());
        }
    }

    /// Returns a scoped name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Checks that the map contains a name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks that the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over name pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
