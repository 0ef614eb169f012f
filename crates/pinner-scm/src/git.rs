//! [`SourceControlClient`] backed by the `git` command line.

use std::path::{Path, PathBuf};

use pinner_core::library::{LibraryName, SourceKind};
use pinner_util::errors::PinnerError;
use pinner_util::fs::{ensure_dir, is_git_checkout};
use pinner_util::process::{CommandBuilder, ProcessError};
use pinner_util::text;

use crate::client::SourceControlClient;

/// Clones every library under `<staging_root>/<library name>`.
#[derive(Debug, Clone)]
pub struct GitClient {
    staging_root: PathBuf,
    program: String,
}

impl GitClient {
    pub fn new(staging_root: impl Into<PathBuf>) -> Self {
        Self {
            staging_root: staging_root.into(),
            program: "git".to_string(),
        }
    }

    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    fn git(&self, dir: &Path) -> CommandBuilder {
        CommandBuilder::new(&self.program)
            .cwd(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
    }

    fn run(&self, library: &LibraryName, cmd: CommandBuilder) -> Result<Vec<u8>, PinnerError> {
        cmd.run().map_err(|e| scm_error(library, e))
    }
}

fn scm_error(library: &LibraryName, err: ProcessError) -> PinnerError {
    PinnerError::SourceControl {
        library: library.to_string(),
        message: err.to_string(),
    }
}

impl SourceControlClient for GitClient {
    fn workdir(&self, library: &LibraryName) -> PathBuf {
        library.staging_dir(&self.staging_root)
    }

    fn ensure_cloned(&self, library: &LibraryName, source: &SourceKind) -> Result<(), PinnerError> {
        let dir = self.workdir(library);
        if is_git_checkout(&dir) {
            return Ok(());
        }

        let SourceKind::Git { clone_url } = source;
        ensure_dir(&dir).map_err(|e| PinnerError::SourceControl {
            library: library.to_string(),
            message: format!("cannot create {}: {e}", dir.display()),
        })?;

        tracing::info!(library = %library, url = %clone_url, "cloning");
        self.run(
            library,
            self.git(&dir).args(["clone", "--quiet", clone_url.as_str(), "."]),
        )?;
        Ok(())
    }

    fn fetch_updates(&self, library: &LibraryName) -> Result<(), PinnerError> {
        let dir = self.workdir(library);
        tracing::debug!(library = %library, "fetching");
        self.run(library, self.git(&dir).args(["fetch", "--quiet", "--tags"]))?;
        Ok(())
    }

    fn list_tags(&self, library: &LibraryName) -> Result<Vec<String>, PinnerError> {
        let dir = self.workdir(library);
        let output = self.run(library, self.git(&dir).arg("tag"))?;
        Ok(text::lines(&output).map(|l| l.trim().to_string()).collect())
    }

    fn checkout(&self, library: &LibraryName, tag: &str) -> Result<(), PinnerError> {
        let dir = self.workdir(library);
        tracing::debug!(library = %library, tag, "checking out");
        self.run(
            library,
            self.git(&dir)
                .args(["-c", "advice.detachedHead=false", "checkout", "--quiet"])
                .arg(format!("refs/tags/{tag}")),
        )?;
        Ok(())
    }
}
