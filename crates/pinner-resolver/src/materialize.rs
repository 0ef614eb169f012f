//! Checking out chosen versions into library working trees.

use std::collections::HashMap;
use std::path::PathBuf;

use pinner_core::library::{LibraryName, SourceKind};
use pinner_scm::client::SourceControlClient;
use pinner_util::errors::PinnerError;

/// Checks out tags through a [`SourceControlClient`], remembering what each
/// working tree currently holds so a repeated checkout is a no-op.
pub struct Materializer<'a> {
    scm: &'a dyn SourceControlClient,
    checked_out: HashMap<LibraryName, String>,
}

impl<'a> Materializer<'a> {
    pub fn new(scm: &'a dyn SourceControlClient) -> Self {
        Self {
            scm,
            checked_out: HashMap::new(),
        }
    }

    pub fn ensure_cloned(
        &self,
        library: &LibraryName,
        source: &SourceKind,
    ) -> Result<(), PinnerError> {
        self.scm.ensure_cloned(library, source)
    }

    pub fn checkout(&mut self, library: &LibraryName, tag: &str) -> Result<(), PinnerError> {
        if self.current(library) == Some(tag) {
            tracing::debug!(library = %library, tag, "already checked out");
            return Ok(());
        }
        self.scm.checkout(library, tag)?;
        self.checked_out.insert(library.clone(), tag.to_string());
        Ok(())
    }

    /// Tag last checked out for `library` in this run.
    pub fn current(&self, library: &LibraryName) -> Option<&str> {
        self.checked_out.get(library).map(String::as_str)
    }

    pub fn workdir(&self, library: &LibraryName) -> PathBuf {
        self.scm.workdir(library)
    }
}
