//! The registration API: register top-level constraints, then pin.

use pinner_core::config::{Config, ResolveStrategy};
use pinner_core::constraint::Constraint;
use pinner_core::dependency::RegistryEntry;
use pinner_core::library::LibraryName;
use pinner_core::version::VersionTag;
use pinner_scm::client::SourceControlClient;
use pinner_scm::probe::ManifestProbe;
use pinner_util::errors::PinnerError;

use crate::context::ResolutionContext;
use crate::discover::{Discoverer, DiscoveryOptions};
use crate::materialize::Materializer;
use crate::resolve::{failures, resolve, Resolution, ResolutionResult};

/// Settings of a pin session.
#[derive(Debug, Clone)]
pub struct PinOptions {
    pub discovery: DiscoveryOptions,
    pub strategy: ResolveStrategy,
    /// Upper bound on re-probe rounds under [`ResolveStrategy::FixedPoint`].
    pub max_rounds: u32,
    /// Separator between name and constraint in [`Pinner::report`].
    pub delimiter: char,
    /// Name of the project at the root of the dependency graph.
    pub root_name: String,
}

impl Default for PinOptions {
    fn default() -> Self {
        Self {
            discovery: DiscoveryOptions::default(),
            strategy: ResolveStrategy::SinglePass,
            max_rounds: 8,
            delimiter: ' ',
            root_name: "(root)".to_string(),
        }
    }
}

impl PinOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            discovery: DiscoveryOptions {
                sources: config.source_rules(),
                tags: config.tags.clone(),
            },
            strategy: config.resolve.strategy,
            max_rounds: config.resolve.max_rounds,
            delimiter: config.probe.delimiter,
            ..Self::default()
        }
    }
}

/// Result of a pin or resolve run.
pub struct PinOutcome {
    pub context: ResolutionContext,
    pub resolution: ResolutionResult,
    /// Every collected error: discovery, resolution, then checkout.
    pub errors: Vec<PinnerError>,
}

impl PinOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Resolved libraries and their winning versions.
    pub fn resolved(&self) -> impl Iterator<Item = (&LibraryName, &VersionTag)> {
        self.resolution
            .iter()
            .filter_map(|(lib, r)| r.version().map(|v| (lib, v)))
    }
}

/// A pin session over one source-control client and manifest probe.
pub struct Pinner<'a> {
    scm: &'a dyn SourceControlClient,
    probe: &'a dyn ManifestProbe,
    options: PinOptions,
    registrations: Vec<RegistryEntry>,
}

impl<'a> Pinner<'a> {
    pub fn new(
        scm: &'a dyn SourceControlClient,
        probe: &'a dyn ManifestProbe,
        options: PinOptions,
    ) -> Self {
        Self {
            scm,
            probe,
            options,
            registrations: Vec::new(),
        }
    }

    pub fn options(&self) -> &PinOptions {
        &self.options
    }

    /// Register a top-level requirement. A malformed constraint is reported
    /// immediately and nothing is registered.
    pub fn register(&mut self, name: &str, expression: &str) -> Result<(), PinnerError> {
        let constraint = Constraint::parse(expression).inspect_err(|e| {
            tracing::warn!(library = name, error = %e, "rejected registration");
        })?;
        self.registrations
            .push(RegistryEntry::top_level(LibraryName::new(name), constraint));
        Ok(())
    }

    pub fn registrations(&self) -> &[RegistryEntry] {
        &self.registrations
    }

    /// Top-level registrations, one `<name><delimiter><constraint>` line each.
    pub fn report(&self) -> String {
        self.registrations
            .iter()
            .map(|r| format!("{}{}{}\n", r.library, self.options.delimiter, r.constraint))
            .collect()
    }

    /// Discover and resolve, then check out every winner.
    pub fn pin(&self) -> PinOutcome {
        self.run(true)
    }

    /// Discover and resolve without the final checkout of winners.
    pub fn resolve(&self) -> PinOutcome {
        self.run(false)
    }

    fn run(&self, materialize: bool) -> PinOutcome {
        let mut ctx = ResolutionContext::new(&self.options.root_name);
        let mut materializer = Materializer::new(self.scm);

        let resolution = {
            let mut discoverer = Discoverer::new(
                self.scm,
                self.probe,
                &mut materializer,
                &self.options.discovery,
            );
            for entry in &self.registrations {
                ctx.graph
                    .add_dependency(None, &entry.library, &entry.constraint);
                ctx.registry.push(entry.clone());
                discoverer.discover(&mut ctx, entry.clone());
            }

            let mut resolution = resolve(&ctx.constraints, &ctx.catalogs);
            if self.options.strategy == ResolveStrategy::FixedPoint {
                resolution = self.refine(&mut discoverer, &mut ctx, resolution);
            }
            resolution
        };

        let mut errors = std::mem::take(&mut ctx.errors);
        errors.extend(failures(&resolution));

        if materialize {
            for (library, resolved) in &resolution {
                let Resolution::Resolved { version } = resolved else {
                    continue;
                };
                match materializer.checkout(library, &version.tag) {
                    Ok(()) => tracing::info!(library = %library, tag = %version.tag, "pinned"),
                    Err(err) => errors.push(err),
                }
            }
        }

        PinOutcome {
            context: ctx,
            resolution,
            errors,
        }
    }

    /// Re-probe winners not yet probed until resolution stops changing.
    fn refine(
        &self,
        discoverer: &mut Discoverer<'_, '_>,
        ctx: &mut ResolutionContext,
        mut resolution: ResolutionResult,
    ) -> ResolutionResult {
        for round in 1..=self.options.max_rounds {
            let pending: Vec<(LibraryName, VersionTag)> = resolution
                .iter()
                .filter_map(|(lib, r)| r.version().map(|v| (lib, v)))
                .filter(|(lib, v)| !ctx.probed.contains(lib, &v.tag))
                .map(|(lib, v)| (lib.clone(), v.clone()))
                .collect();
            if pending.is_empty() {
                tracing::debug!(round, "resolution reached a fixed point");
                return resolution;
            }

            tracing::debug!(round, pending = pending.len(), "re-probing resolved versions");
            for (library, version) in pending {
                if let Err(err) = discoverer.probe_at(ctx, &library, &version) {
                    ctx.errors.push(err);
                }
            }
            resolution = resolve(&ctx.constraints, &ctx.catalogs);
        }

        tracing::warn!(
            max_rounds = self.options.max_rounds,
            "resolution did not settle within the round limit"
        );
        resolution
    }
}
