//! Depth-first discovery of transitive dependencies.
//!
//! For each registry entry: classify its source, build the library's catalog
//! once, check out the highest version satisfying that entry's constraint
//! alone, probe it for declared dependencies and recurse into them. The
//! entry's constraint is recorded whatever happens on the branch, and a
//! failing branch never stops its siblings.

use pinner_core::dependency::RegistryEntry;
use pinner_core::library::{LibraryName, SourceRules};
use pinner_core::version::{TagScheme, VersionTag};
use pinner_scm::client::SourceControlClient;
use pinner_scm::probe::ManifestProbe;
use pinner_util::errors::PinnerError;

use crate::catalog::build_catalog;
use crate::context::ResolutionContext;
use crate::materialize::Materializer;

/// What discovery needs to know about hosting and tags.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    pub sources: SourceRules,
    pub tags: TagScheme,
}

pub struct Discoverer<'a, 'm> {
    scm: &'a dyn SourceControlClient,
    probe: &'a dyn ManifestProbe,
    materializer: &'m mut Materializer<'a>,
    options: &'a DiscoveryOptions,
    /// Libraries whose dependencies are being walked, outermost first.
    in_progress: Vec<LibraryName>,
}

impl<'a, 'm> Discoverer<'a, 'm> {
    pub fn new(
        scm: &'a dyn SourceControlClient,
        probe: &'a dyn ManifestProbe,
        materializer: &'m mut Materializer<'a>,
        options: &'a DiscoveryOptions,
    ) -> Self {
        Self {
            scm,
            probe,
            materializer,
            options,
            in_progress: Vec::new(),
        }
    }

    /// Walk `entry` and everything it transitively declares.
    pub fn discover(&mut self, ctx: &mut ResolutionContext, entry: RegistryEntry) {
        let span = tracing::debug_span!("discover", library = %entry.library);
        let _guard = span.enter();

        let outcome = self.visit(ctx, &entry);
        ctx.constraints.record(&entry);
        if let Err(err) = outcome {
            tracing::warn!(library = %entry.library, error = %err, "discovery branch failed");
            ctx.errors.push(err);
        }
    }

    fn visit(&mut self, ctx: &mut ResolutionContext, entry: &RegistryEntry) -> Result<(), PinnerError> {
        let library = &entry.library;
        if let Some(pos) = self.in_progress.iter().position(|l| l == library) {
            let mut path: Vec<&str> = self.in_progress[pos..].iter().map(LibraryName::as_str).collect();
            path.push(library.as_str());
            return Err(PinnerError::DependencyCycle {
                path: path.join(" -> "),
            });
        }

        let source = self.options.sources.detect(library)?;

        if !ctx.catalogs.contains_key(library) {
            if ctx.unavailable.contains(library) {
                tracing::debug!(library = %library, "catalog unavailable, already reported");
                return Ok(());
            }
            match build_catalog(self.materializer, self.scm, library, &source, &self.options.tags) {
                Ok(catalog) => {
                    ctx.catalogs.insert(library.clone(), catalog);
                }
                Err(err) => {
                    ctx.unavailable.insert(library.clone());
                    return Err(err);
                }
            }
        }

        let pick = ctx
            .catalog(library)
            .and_then(|c| c.highest_matching(&entry.constraint))
            .cloned();
        let Some(pick) = pick else {
            tracing::debug!(
                library = %library,
                constraint = %entry.constraint,
                "no version satisfies this constraint alone, skipping probe"
            );
            return Ok(());
        };

        self.probe_at(ctx, library, &pick)
    }

    /// Check out `version` of `library`, probe it and discover whatever it
    /// declares. A version already probed in this run is skipped.
    pub fn probe_at(
        &mut self,
        ctx: &mut ResolutionContext,
        library: &LibraryName,
        version: &VersionTag,
    ) -> Result<(), PinnerError> {
        if !ctx.probed.mark(library, &version.tag) {
            tracing::debug!(library = %library, tag = %version.tag, "already probed");
            return Ok(());
        }

        self.materializer.checkout(library, &version.tag)?;
        let workdir = self.materializer.workdir(library);
        let declared = self.probe.probe(library, &workdir)?;

        let children = declared
            .into_iter()
            .map(|d| {
                d.into_entry(library).map_err(|e| PinnerError::ManifestProbe {
                    library: library.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            library = %library,
            tag = %version.tag,
            dependencies = children.len(),
            "probed"
        );

        self.in_progress.push(library.clone());
        for child in children {
            ctx.graph
                .add_dependency(Some(library), &child.library, &child.constraint);
            ctx.registry.push(child.clone());
            self.discover(ctx, child);
        }
        self.in_progress.pop();
        Ok(())
    }
}
