//! Memo of which library versions have already been probed in a run.

use std::collections::HashSet;

use pinner_core::library::LibraryName;

/// Tracks probed `(library, tag)` pairs so each materialized version is
/// asked for its dependencies at most once.
#[derive(Debug, Default)]
pub struct ProbeMemo {
    probed: HashSet<(LibraryName, String)>,
}

impl ProbeMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as probed. Returns `false` if it already was.
    pub fn mark(&mut self, library: &LibraryName, tag: &str) -> bool {
        self.probed.insert((library.clone(), tag.to_string()))
    }

    pub fn contains(&self, library: &LibraryName, tag: &str) -> bool {
        self.probed.contains(&(library.clone(), tag.to_string()))
    }

    pub fn len(&self) -> usize {
        self.probed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probed.is_empty()
    }
}
