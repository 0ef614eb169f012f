//! Locating the project, loading configuration and building the collaborators
//! every operation needs.

use std::path::{Path, PathBuf};

use pinner_core::config::Config;
use pinner_core::manifest::PinManifest;
use pinner_core::MANIFEST_FILE;
use pinner_resolver::session::{PinOptions, Pinner};
use pinner_scm::client::SourceControlClient;
use pinner_scm::git::GitClient;
use pinner_scm::probe::{CommandProbe, ManifestProbe};
use pinner_util::errors::PinnerError;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit `Pin.toml`; otherwise searched from the working directory up.
    pub manifest_path: Option<PathBuf>,
    /// Staging root overriding config and environment.
    pub staging: Option<PathBuf>,
    pub verbose: bool,
}

/// A loaded project: its manifest and the effective configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub manifest_path: PathBuf,
    pub manifest: PinManifest,
    pub config: Config,
}

impl Project {
    /// Find and parse the project manifest, then load the global config.
    pub fn load(opts: &GlobalOptions) -> miette::Result<Self> {
        let cwd = std::env::current_dir().map_err(PinnerError::Io)?;
        let manifest_path = locate_manifest(&cwd, opts.manifest_path.as_deref())?;
        let mut config = Config::load()?;
        if let Some(staging) = &opts.staging {
            config.staging.root = Some(staging.clone());
        }
        Self::with_config(manifest_path, config)
    }

    pub fn with_config(manifest_path: PathBuf, config: Config) -> miette::Result<Self> {
        let manifest = PinManifest::from_path(&manifest_path)?;
        tracing::debug!(manifest = %manifest_path.display(), "loaded project manifest");
        Ok(Self {
            manifest_path,
            manifest,
            config,
        })
    }

    /// Directory holding the manifest.
    pub fn root(&self) -> &Path {
        self.manifest_path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn pin_options(&self) -> PinOptions {
        PinOptions {
            root_name: self.manifest.root_name().to_string(),
            ..PinOptions::from_config(&self.config)
        }
    }

    /// Git client rooted at the configured staging directory, and the probe
    /// command from `[probe]`.
    pub fn collaborators(&self) -> (GitClient, CommandProbe) {
        let probe = &self.config.probe;
        (
            GitClient::new(self.config.staging_root()),
            CommandProbe::new(probe.command.clone(), probe.manifest.clone(), probe.delimiter),
        )
    }

    /// A session with every manifest dependency registered.
    pub fn pinner<'a>(
        &self,
        scm: &'a dyn SourceControlClient,
        probe: &'a dyn ManifestProbe,
    ) -> miette::Result<Pinner<'a>> {
        let mut pinner = Pinner::new(scm, probe, self.pin_options());
        for (name, expression) in &self.manifest.dependencies {
            pinner.register(name, expression)?;
        }
        Ok(pinner)
    }
}

/// Resolve the manifest location: the explicit path if given, otherwise the
/// nearest `Pin.toml` in `start` or one of its ancestors.
pub fn locate_manifest(start: &Path, explicit: Option<&Path>) -> miette::Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(PinnerError::Manifest {
                message: format!("{} does not exist", path.display()),
            }
            .into());
        }
        return Ok(path.to_path_buf());
    }

    pinner_util::fs::find_ancestor_with(start, MANIFEST_FILE)
        .map(|dir| dir.join(MANIFEST_FILE))
        .ok_or_else(|| {
            PinnerError::Manifest {
                message: format!(
                    "could not find {MANIFEST_FILE} in {} or any parent directory",
                    start.display()
                ),
            }
            .into()
        })
}
