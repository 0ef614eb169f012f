use std::path::PathBuf;

use pinner_core::library::{LibraryName, SourceKind};
use pinner_util::errors::PinnerError;

/// Lookup-and-clone protocol against the hosting service.
///
/// Calls are blocking. Failures are reported as
/// [`PinnerError::SourceControl`] for the library concerned.
pub trait SourceControlClient {
    /// Local working tree of `library`.
    fn workdir(&self, library: &LibraryName) -> PathBuf;

    /// Clone `library` into its working tree unless it is already there.
    fn ensure_cloned(&self, library: &LibraryName, source: &SourceKind) -> Result<(), PinnerError>;

    /// Bring the local clone up to date with the remote, tags included.
    fn fetch_updates(&self, library: &LibraryName) -> Result<(), PinnerError>;

    /// All tag names of the local clone, unfiltered.
    fn list_tags(&self, library: &LibraryName) -> Result<Vec<String>, PinnerError>;

    /// Check out `tag` in the working tree.
    fn checkout(&self, library: &LibraryName, tag: &str) -> Result<(), PinnerError>;
}
