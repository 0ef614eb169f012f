//! Per-library catalog of released versions.

use pinner_core::constraint::Constraint;
use pinner_core::library::{LibraryName, SourceKind};
use pinner_core::version::{TagScheme, VersionTag};
use pinner_scm::client::SourceControlClient;
use pinner_util::errors::PinnerError;
use serde::Serialize;

use crate::materialize::Materializer;
use crate::resolve::pick_highest;

/// Every release of one library, in tag-listing order.
///
/// Ordering is left to resolution; the catalog only filters and parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionCatalog {
    versions: Vec<VersionTag>,
}

impl VersionCatalog {
    /// Keep the tags that parse as versions under `scheme`.
    pub fn from_tags<I, S>(tags: I, scheme: &TagScheme) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let versions = tags
            .into_iter()
            .filter_map(|t| scheme.parse_tag(t.as_ref()))
            .collect();
        Self { versions }
    }

    pub fn versions(&self) -> &[VersionTag] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Highest version satisfying `constraint` alone.
    pub fn highest_matching(&self, constraint: &Constraint) -> Option<&VersionTag> {
        pick_highest(&self.versions, |v| constraint.matches_tag(v))
    }
}

/// Clone (if needed) through the materializer, then fetch and list the tags
/// of `library`.
pub fn build_catalog(
    materializer: &Materializer<'_>,
    scm: &dyn SourceControlClient,
    library: &LibraryName,
    source: &SourceKind,
    scheme: &TagScheme,
) -> Result<VersionCatalog, PinnerError> {
    materializer.ensure_cloned(library, source)?;
    scm.fetch_updates(library)?;
    let tags = scm.list_tags(library)?;
    let catalog = VersionCatalog::from_tags(&tags, scheme);
    tracing::debug!(
        library = %library,
        tags = tags.len(),
        versions = catalog.len(),
        "built version catalog"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_non_version_tags_in_order() {
        let catalog = VersionCatalog::from_tags(
            ["v1.2.0", "latest", "v1.0.0", "release-notes"],
            &TagScheme::default(),
        );
        let tags: Vec<&str> = catalog.versions().iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(tags, vec!["v1.2.0", "v1.0.0"]);
    }

    #[test]
    fn highest_matching_local_pick() {
        let catalog =
            VersionCatalog::from_tags(["v1.0.0", "v1.5.0", "v2.0.0"], &TagScheme::default());
        let c = Constraint::parse("< 2.0").unwrap();
        assert_eq!(catalog.highest_matching(&c).unwrap().tag, "v1.5.0");
        let none = Constraint::parse("> 3.0").unwrap();
        assert!(catalog.highest_matching(&none).is_none());
    }
}
