//! In-memory hosting service and manifest probe for resolver tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use pinner_core::dependency::DeclaredDependency;
use pinner_core::library::{LibraryName, SourceKind};
use pinner_scm::client::SourceControlClient;
use pinner_scm::probe::ManifestProbe;
use pinner_util::errors::PinnerError;

/// A fake hosting service whose libraries exist only as tag lists and
/// per-tag dependency declarations. Every call is recorded.
#[derive(Default)]
pub struct FakeHost {
    tags: HashMap<String, Vec<String>>,
    declares: HashMap<(String, String), Vec<DeclaredDependency>>,
    broken_clone: HashSet<String>,
    broken_checkout: HashSet<(String, String)>,
    current: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `library` with the given tag names.
    pub fn library(mut self, name: &str, tags: &[&str]) -> Self {
        self.tags
            .insert(name.to_string(), tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Make `library` at `tag` declare the given dependencies.
    pub fn declares(mut self, name: &str, tag: &str, deps: &[(&str, &str)]) -> Self {
        self.declares.insert(
            (name.to_string(), tag.to_string()),
            deps.iter()
                .map(|(n, c)| DeclaredDependency::new(*n, *c))
                .collect(),
        );
        self
    }

    pub fn broken_clone(mut self, name: &str) -> Self {
        self.broken_clone.insert(name.to_string());
        self
    }

    pub fn broken_checkout(mut self, name: &str, tag: &str) -> Self {
        self.broken_checkout.insert((name.to_string(), tag.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls equal to `call`, e.g. `"clone github.com/o/a"`.
    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn checked_out(&self, name: &str) -> Option<String> {
        self.current.borrow().get(name).cloned()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn failure(library: &LibraryName, message: &str) -> PinnerError {
        PinnerError::SourceControl {
            library: library.to_string(),
            message: message.to_string(),
        }
    }
}

impl SourceControlClient for FakeHost {
    fn workdir(&self, library: &LibraryName) -> PathBuf {
        library.staging_dir(Path::new("/staging"))
    }

    fn ensure_cloned(&self, library: &LibraryName, _source: &SourceKind) -> Result<(), PinnerError> {
        self.record(format!("clone {library}"));
        if self.broken_clone.contains(library.as_str()) || !self.tags.contains_key(library.as_str()) {
            return Err(Self::failure(library, "repository not found"));
        }
        Ok(())
    }

    fn fetch_updates(&self, library: &LibraryName) -> Result<(), PinnerError> {
        self.record(format!("fetch {library}"));
        Ok(())
    }

    fn list_tags(&self, library: &LibraryName) -> Result<Vec<String>, PinnerError> {
        self.record(format!("tags {library}"));
        Ok(self.tags.get(library.as_str()).cloned().unwrap_or_default())
    }

    fn checkout(&self, library: &LibraryName, tag: &str) -> Result<(), PinnerError> {
        self.record(format!("checkout {library} {tag}"));
        if self
            .broken_checkout
            .contains(&(library.to_string(), tag.to_string()))
        {
            return Err(Self::failure(library, "checkout failed"));
        }
        self.current
            .borrow_mut()
            .insert(library.to_string(), tag.to_string());
        Ok(())
    }
}

impl ManifestProbe for FakeHost {
    fn probe(
        &self,
        library: &LibraryName,
        _workdir: &Path,
    ) -> Result<Vec<DeclaredDependency>, PinnerError> {
        let tag = self
            .checked_out(library.as_str())
            .ok_or_else(|| PinnerError::ManifestProbe {
                library: library.to_string(),
                message: "probed before checkout".to_string(),
            })?;
        self.record(format!("probe {library} {tag}"));
        Ok(self
            .declares
            .get(&(library.to_string(), tag))
            .cloned()
            .unwrap_or_default())
    }
}
