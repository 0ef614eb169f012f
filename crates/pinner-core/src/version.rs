//! Released versions derived from version-control tags.
//!
//! A tag such as `v1.2.0` becomes a [`VersionTag`] holding both the parsed
//! semver version and the exact tag text, so a later checkout uses the tag
//! that was actually listed rather than a reconstruction.

use std::cmp::Ordering;
use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

/// A released version of a library and the tag it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionTag {
    pub version: Version,
    pub tag: String,
}

impl VersionTag {
    pub fn new(version: Version, tag: impl Into<String>) -> Self {
        Self {
            version,
            tag: tag.into(),
        }
    }

    /// Semver precedence: build metadata does not participate.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        precedence(&self.version, &other.version)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Compare two versions by semver precedence, ignoring build metadata.
pub fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// The tag naming convention of released versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagScheme {
    /// Marker in front of the version, `v` in `v1.2.0`.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Reject tags that lack the marker.
    #[serde(default = "default_prefix_required", rename = "prefix-required")]
    pub prefix_required: bool,
}

impl Default for TagScheme {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            prefix_required: default_prefix_required(),
        }
    }
}

fn default_prefix() -> String {
    "v".to_string()
}

fn default_prefix_required() -> bool {
    true
}

impl TagScheme {
    /// Parse a raw tag into a version, or `None` if it is not a release tag.
    pub fn parse_tag(&self, tag: &str) -> Option<VersionTag> {
        let tag = tag.trim();
        let text = match tag.strip_prefix(self.prefix.as_str()) {
            Some(rest) if !self.prefix.is_empty() => rest,
            _ if self.prefix_required && !self.prefix.is_empty() => return None,
            _ => tag,
        };
        parse_lenient(text).map(|version| VersionTag::new(version, tag))
    }
}

/// Parse a version whose numeric core may have fewer than three components.
///
/// `1` and `1.2` are read as `1.0.0` and `1.2.0`; pre-release and build
/// suffixes are kept as written.
pub fn parse_lenient(text: &str) -> Option<Version> {
    let split = text.find(|c| c == '-' || c == '+').unwrap_or(text.len());
    let (core, suffix) = text.split_at(split);
    let parts = numeric_core(core)?;

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Version::parse(&padded).ok()
}

/// Split a dotted numeric core into one to three digit-only components.
pub(crate) fn numeric_core(core: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    Some(parts)
}
