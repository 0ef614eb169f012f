use std::fmt;

use pinner_util::errors::PinnerError;
use serde::Serialize;

use crate::constraint::Constraint;
use crate::library::LibraryName;

/// One dependent's requirement on one library.
///
/// Entries naming the same library are never merged; only their constraints
/// are aggregated at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub library: LibraryName,
    pub constraint: Constraint,
    /// The library that declared this requirement; `None` for a top-level
    /// registration.
    pub required_by: Option<LibraryName>,
}

impl RegistryEntry {
    pub fn top_level(library: LibraryName, constraint: Constraint) -> Self {
        Self {
            library,
            constraint,
            required_by: None,
        }
    }

    pub fn declared_by(parent: &LibraryName, library: LibraryName, constraint: Constraint) -> Self {
        Self {
            library,
            constraint,
            required_by: Some(parent.clone()),
        }
    }
}

impl fmt::Display for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.library, self.constraint)
    }
}

/// A `(name, constraint)` pair as announced by a library's manifest probe,
/// before the constraint is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub name: String,
    pub constraint: String,
}

impl DeclaredDependency {
    pub fn new(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
        }
    }

    /// Parse the constraint into a registry entry declared by `parent`.
    pub fn into_entry(self, parent: &LibraryName) -> Result<RegistryEntry, PinnerError> {
        let constraint = Constraint::parse(&self.constraint)?;
        Ok(RegistryEntry::declared_by(
            parent,
            LibraryName::from(self.name),
            constraint,
        ))
    }
}
