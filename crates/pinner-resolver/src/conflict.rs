//! Reporting of libraries whose constraints cannot all be met.

use std::fmt;

use pinner_core::library::LibraryName;
use pinner_util::errors::PinnerError;
use serde::Serialize;

use crate::constraints::RecordedConstraint;

/// An empty intersection: no catalog version satisfies every constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub library: LibraryName,
    pub constraints: Vec<RecordedConstraint>,
    /// Tags known for the library, in catalog order.
    pub available: Vec<String>,
}

impl Conflict {
    pub fn to_error(&self) -> PinnerError {
        PinnerError::NoSatisfyingVersion {
            library: self.library.to_string(),
            details: self.to_string(),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "constraints on {}:", self.library)?;
        for c in &self.constraints {
            writeln!(f, "  {c}")?;
        }
        if self.available.is_empty() {
            write!(f, "no released versions found")
        } else {
            write!(f, "available: {}", self.available.join(", "))
        }
    }
}
