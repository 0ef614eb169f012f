//! Selection of one version per library.
//!
//! For every library with at least one recorded constraint, the winner is
//! the highest catalog version satisfying all of them. There is no
//! backtracking: libraries are resolved independently, in one pass each.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use pinner_core::library::LibraryName;
use pinner_core::version::VersionTag;
use pinner_util::errors::PinnerError;
use serde::Serialize;

use crate::catalog::VersionCatalog;
use crate::conflict::Conflict;
use crate::constraints::{ConstraintSet, RecordedConstraint};

/// Outcome of resolution for one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Resolution {
    Resolved { version: VersionTag },
    /// The constraints have an empty intersection over the catalog.
    Unsatisfiable { conflict: Conflict },
    /// No catalog exists; discovery already reported why.
    Unavailable,
}

impl Resolution {
    pub fn version(&self) -> Option<&VersionTag> {
        match self {
            Self::Resolved { version } => Some(version),
            _ => None,
        }
    }
}

/// Library name to its resolution.
pub type ResolutionResult = BTreeMap<LibraryName, Resolution>;

/// Resolve every library in `constraints` against its catalog.
pub fn resolve(
    constraints: &ConstraintSet,
    catalogs: &BTreeMap<LibraryName, VersionCatalog>,
) -> ResolutionResult {
    constraints
        .iter()
        .map(|(library, recorded)| {
            let resolution = match catalogs.get(library) {
                Some(catalog) => resolve_library(library, recorded, catalog),
                None => Resolution::Unavailable,
            };
            match &resolution {
                Resolution::Resolved { version } => {
                    tracing::info!(library = %library, version = %version, "resolved");
                }
                Resolution::Unsatisfiable { .. } => {
                    tracing::warn!(library = %library, "no version satisfies all constraints");
                }
                Resolution::Unavailable => {}
            }
            (library.clone(), resolution)
        })
        .collect()
}

/// Highest version of `catalog` satisfying every constraint in `recorded`.
pub fn resolve_library(
    library: &LibraryName,
    recorded: &[RecordedConstraint],
    catalog: &VersionCatalog,
) -> Resolution {
    let winner = pick_highest(catalog.versions(), |v| {
        recorded.iter().all(|r| r.constraint.matches_tag(v))
    });
    match winner {
        Some(version) => Resolution::Resolved {
            version: version.clone(),
        },
        None => Resolution::Unsatisfiable {
            conflict: Conflict {
                library: library.clone(),
                constraints: recorded.to_vec(),
                available: catalog.versions().iter().map(|v| v.tag.clone()).collect(),
            },
        },
    }
}

/// Highest-precedence version accepted by `accept`.
///
/// Among versions of equal precedence the first one in `versions` wins.
pub fn pick_highest<F>(versions: &[VersionTag], accept: F) -> Option<&VersionTag>
where
    F: Fn(&VersionTag) -> bool,
{
    versions
        .iter()
        .filter(|&v| accept(v))
        .fold(None, |best: Option<&VersionTag>, v| match best {
            Some(b) if v.cmp_precedence(b) != Ordering::Greater => Some(b),
            _ => Some(v),
        })
}

/// Errors for every unsatisfiable library.
pub fn failures(result: &ResolutionResult) -> Vec<PinnerError> {
    result
        .values()
        .filter_map(|r| match r {
            Resolution::Unsatisfiable { conflict } => Some(conflict.to_error()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinner_core::constraint::Constraint;
    use pinner_core::dependency::RegistryEntry;
    use pinner_core::version::TagScheme;

    fn catalog(tags: &[&str]) -> VersionCatalog {
        VersionCatalog::from_tags(tags.iter().copied(), &TagScheme::default())
    }

    fn set(lib: &str, exprs: &[&str]) -> ConstraintSet {
        let mut set = ConstraintSet::new();
        for e in exprs {
            set.record(&RegistryEntry::top_level(
                lib.into(),
                Constraint::parse(e).unwrap(),
            ));
        }
        set
    }

    #[test]
    fn highest_pick() {
        let lib = LibraryName::new("github.com/a/b");
        let constraints = set("github.com/a/b", &[">= 1.0, < 2.0"]);
        let catalogs = BTreeMap::from([(lib.clone(), catalog(&["v1.0.0", "v1.5.0", "v1.2.0"]))]);
        let result = resolve(&constraints, &catalogs);
        assert_eq!(result[&lib].version().unwrap().tag, "v1.5.0");
    }

    #[test]
    fn tie_prefers_first_seen() {
        let lib = LibraryName::new("github.com/a/b");
        let constraints = set("github.com/a/b", &[">= 1.0"]);
        let catalogs = BTreeMap::from([(lib.clone(), catalog(&["v1.0", "v1.0.0", "v0.9.0"]))]);
        let result = resolve(&constraints, &catalogs);
        assert_eq!(result[&lib].version().unwrap().tag, "v1.0");

        let catalogs = BTreeMap::from([(lib.clone(), catalog(&["v1.0.0", "v1.0"]))]);
        let result = resolve(&constraints, &catalogs);
        assert_eq!(result[&lib].version().unwrap().tag, "v1.0.0");
    }

    #[test]
    fn missing_catalog_is_unavailable() {
        let lib = LibraryName::new("gitlab.com/a/b");
        let constraints = set("gitlab.com/a/b", &[">= 1.0"]);
        let result = resolve(&constraints, &BTreeMap::new());
        assert_eq!(result[&lib], Resolution::Unavailable);
        assert!(failures(&result).is_empty());
    }

    #[test]
    fn empty_catalog_is_unsatisfiable() {
        let lib = LibraryName::new("github.com/a/b");
        let constraints = set("github.com/a/b", &[">= 1.0"]);
        let catalogs = BTreeMap::from([(lib.clone(), catalog(&["latest"]))]);
        let result = resolve(&constraints, &catalogs);
        assert!(matches!(result[&lib], Resolution::Unsatisfiable { .. }));
        assert_eq!(failures(&result).len(), 1);
    }

    #[test]
    fn serializes_with_status_tag() {
        let lib = LibraryName::new("github.com/a/b");
        let constraints = set("github.com/a/b", &["= 1.0.0"]);
        let catalogs = BTreeMap::from([(lib.clone(), catalog(&["v1.0.0"]))]);
        let result = resolve(&constraints, &catalogs);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["github.com/a/b"]["status"], "resolved");
        assert_eq!(json["github.com/a/b"]["version"]["tag"], "v1.0.0");
        assert_eq!(json["github.com/a/b"]["version"]["version"], "1.0.0");
    }
}
