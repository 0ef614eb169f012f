//! Aggregation of every constraint expressed against each library.

use std::collections::BTreeMap;
use std::fmt;

use pinner_core::constraint::Constraint;
use pinner_core::dependency::RegistryEntry;
use pinner_core::library::LibraryName;
use serde::Serialize;

/// One constraint on a library and who expressed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedConstraint {
    pub constraint: Constraint,
    pub required_by: Option<LibraryName>,
}

impl fmt::Display for RecordedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.required_by {
            Some(parent) => write!(f, "{} (required by {parent})", self.constraint),
            None => write!(f, "{} (top-level)", self.constraint),
        }
    }
}

/// Library name to every constraint recorded against it.
///
/// Append-only: nothing is ever removed once recorded.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    by_library: BTreeMap<LibraryName, Vec<RecordedConstraint>>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: &RegistryEntry) {
        self.by_library
            .entry(entry.library.clone())
            .or_default()
            .push(RecordedConstraint {
                constraint: entry.constraint.clone(),
                required_by: entry.required_by.clone(),
            });
    }

    /// Constraints recorded against `library`, in recording order.
    pub fn get(&self, library: &LibraryName) -> &[RecordedConstraint] {
        self.by_library
            .get(library)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn libraries(&self) -> impl Iterator<Item = &LibraryName> {
        self.by_library.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LibraryName, &[RecordedConstraint])> {
        self.by_library.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Total number of recorded constraints across all libraries.
    pub fn total(&self) -> usize {
        self.by_library.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_library.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(lib: &str, expr: &str) -> RegistryEntry {
        RegistryEntry::top_level(lib.into(), Constraint::parse(expr).unwrap())
    }

    #[test]
    fn records_accumulate_per_library() {
        let mut set = ConstraintSet::new();
        set.record(&entry("github.com/a/b", ">= 1.0"));
        set.record(&entry("github.com/a/b", "< 2.0"));
        set.record(&entry("github.com/c/d", "= 0.1"));
        assert_eq!(set.get(&"github.com/a/b".into()).len(), 2);
        assert_eq!(set.total(), 3);
        assert_eq!(set.libraries().count(), 2);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut set = ConstraintSet::new();
        set.record(&entry("github.com/a/b", ">= 1.0"));
        set.record(&entry("github.com/a/b", ">= 1.0"));
        assert_eq!(set.total(), 2);
    }

    #[test]
    fn unknown_library_has_no_constraints() {
        let set = ConstraintSet::new();
        assert!(set.get(&"github.com/x/y".into()).is_empty());
    }

    #[test]
    fn display_names_requester() {
        let r = RecordedConstraint {
            constraint: Constraint::parse("= 1.0").unwrap(),
            required_by: Some("github.com/a/app".into()),
        };
        assert_eq!(r.to_string(), "= 1.0 (required by github.com/a/app)");
    }
}
