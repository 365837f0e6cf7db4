// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::hash::Hasher;

use siphasher::sip128::{Hasher128, SipHasher13};

/// A scope identifier.
///
/// A 128-bit SipHash of the document content written as 32 hex digits,
/// optionally followed by an index of an `svg` element.
/// Unlike `DefaultHasher`, the hash is stable across runs and platforms.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ScopeId(String);

impl ScopeId {
    /// Creates a new scope identifier from a document content.
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = SipHasher13::new();
        hasher.write(data);
        let hash = hasher.finish128();
        ScopeId(format!("{:016x}{:016x}", hash.h1, hash.h2))
    }

    /// Returns a new identifier with an appended positional index.
    pub fn with_index(&self, index: usize) -> Self {
        ScopeId(format!("{}-{}", self.0, index))
    }

    /// Appends the identifier to a name.
    ///
    /// `name` -> `name-{id}`
    #[inline]
    pub fn scoped(&self, name: &str) -> String {
        format!("{}-{}", name, self.0)
    }

    /// Returns the identifier as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
