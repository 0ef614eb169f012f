//! State of a single pin run.

use std::collections::{BTreeMap, BTreeSet};

use pinner_core::dependency::RegistryEntry;
use pinner_core::library::LibraryName;
use pinner_util::errors::PinnerError;

use crate::cache::ProbeMemo;
use crate::catalog::VersionCatalog;
use crate::constraints::ConstraintSet;
use crate::graph::DependencyGraph;

/// Everything discovery accumulates and resolution reads.
///
/// A fresh context is created for every run, so nothing leaks between
/// independent invocations.
pub struct ResolutionContext {
    /// Every registry entry, top-level and discovered, in creation order.
    pub registry: Vec<RegistryEntry>,
    pub constraints: ConstraintSet,
    pub catalogs: BTreeMap<LibraryName, VersionCatalog>,
    /// Libraries whose catalog could not be built; never retried in this run.
    pub unavailable: BTreeSet<LibraryName>,
    pub graph: DependencyGraph,
    pub probed: ProbeMemo,
    /// Errors collected per branch, in the order they occurred.
    pub errors: Vec<PinnerError>,
}

impl ResolutionContext {
    pub fn new(root_name: &str) -> Self {
        Self {
            registry: Vec::new(),
            constraints: ConstraintSet::new(),
            catalogs: BTreeMap::new(),
            unavailable: BTreeSet::new(),
            graph: DependencyGraph::new(root_name),
            probed: ProbeMemo::new(),
            errors: Vec::new(),
        }
    }

    pub fn catalog(&self, library: &LibraryName) -> Option<&VersionCatalog> {
        self.catalogs.get(library)
    }
}
