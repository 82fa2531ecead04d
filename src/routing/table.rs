//! Immutable prefix → source table.
//!
//! A `RouteTable` is built once by the loader and never mutated after it is
//! published. Readers hold it through an `Arc`, so an old generation stays
//! alive for as long as some in-flight request still uses it.

use std::collections::hash_map::{Entry, HashMap};

use serde::Serialize;

/// Where a vanity prefix actually lives: the VCS kind and repository URL.
///
/// Both fields are opaque and copied verbatim into responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Source {
    pub vcs: String,
    pub url: String,
}

impl Source {
    pub fn new(vcs: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            vcs: vcs.into(),
            url: url.into(),
        }
    }
}

/// Returned by [`RouteTable::try_insert`] when the prefix is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePrefix(pub String);

/// Mapping from path prefix to [`Source`]. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<String, Source>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, refusing to overwrite an existing prefix.
    pub fn try_insert(
        &mut self,
        prefix: impl Into<String>,
        source: Source,
    ) -> Result<(), DuplicatePrefix> {
        match self.routes.entry(prefix.into()) {
            Entry::Occupied(e) => Err(DuplicatePrefix(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(source);
                Ok(())
            }
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&Source> {
        self.routes.get(prefix)
    }

    /// Look up a prefix and hand back the stored key alongside the source.
    pub fn get_key_value(&self, prefix: &str) -> Option<(&str, &Source)> {
        self.routes
            .get_key_value(prefix)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Source)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries sorted by prefix, for stable listings.
    pub fn sorted(&self) -> Vec<(&str, &Source)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
