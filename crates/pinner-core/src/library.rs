//! Library names and the hosting pattern that makes them fetchable.

use std::fmt;
use std::path::{Path, PathBuf};

use pinner_util::errors::PinnerError;
use serde::{Deserialize, Serialize};

/// Identifier of a source-hosted library, e.g. `github.com/foo/bar`.
///
/// Compared by exact string equality; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryName(String);

impl LibraryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `/`-separated path segments of the name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Working directory of this library under the staging root.
    ///
    /// Path-shaped names become nested directories.
    pub fn staging_dir(&self, root: &Path) -> PathBuf {
        self.segments().fold(root.to_path_buf(), |dir, seg| dir.join(seg))
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LibraryName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LibraryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for LibraryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a supported library is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A git repository reachable at `clone_url`.
    Git { clone_url: String },
}

/// The hosting pattern deciding which library names are supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRules {
    pub hosts: Vec<String>,
    pub protocol: String,
}

impl Default for SourceRules {
    fn default() -> Self {
        Self {
            hosts: vec!["github.com".to_string()],
            protocol: "https".to_string(),
        }
    }
}

impl SourceRules {
    /// Classify a library name, failing with `UnsupportedDependency` when it
    /// does not match a configured host.
    ///
    /// A supported name is `<host>/<path>...` with no empty, `.` or `..`
    /// segments, so its staging directory never escapes the staging root.
    pub fn detect(&self, library: &LibraryName) -> Result<SourceKind, PinnerError> {
        let unsupported = |reason: String| PinnerError::UnsupportedDependency {
            library: library.to_string(),
            reason,
        };

        let segments: Vec<&str> = library.segments().collect();
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(unsupported(format!("invalid path segment '{bad}'")));
        }

        let host = segments[0];
        if !self.hosts.iter().any(|h| h == host) {
            return Err(unsupported(format!(
                "host '{host}' is not a supported source host"
            )));
        }
        if segments.len() < 2 {
            return Err(unsupported("missing repository path after host".to_string()));
        }

        Ok(SourceKind::Git {
            clone_url: format!("{}://{}.git", self.protocol, library),
        })
    }
}
