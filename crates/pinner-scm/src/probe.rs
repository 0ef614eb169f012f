//! Asking a materialized library what it depends on.

use std::path::Path;

use pinner_core::dependency::DeclaredDependency;
use pinner_core::library::LibraryName;
use pinner_util::errors::PinnerError;
use pinner_util::process::CommandBuilder;
use pinner_util::text;

/// Environment variable telling a library's own pin entry point which mode to run in.
pub const MODE_ENV: &str = "PIN_MODE";

/// Reports the dependencies a checked-out library declares.
pub trait ManifestProbe {
    /// Declared `(name, constraint)` pairs of the library checked out at
    /// `workdir`; empty when it declares none.
    fn probe(
        &self,
        library: &LibraryName,
        workdir: &Path,
    ) -> Result<Vec<DeclaredDependency>, PinnerError>;
}

/// Runs a command inside the working tree and reads one
/// `<name><delimiter><constraint>` pair per output line.
///
/// Libraries without the manifest file are treated as declaring nothing.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    command: Vec<String>,
    manifest: String,
    delimiter: char,
}

impl CommandProbe {
    pub fn new(command: Vec<String>, manifest: impl Into<String>, delimiter: char) -> Self {
        Self {
            command,
            manifest: manifest.into(),
            delimiter,
        }
    }
}

impl ManifestProbe for CommandProbe {
    fn probe(
        &self,
        library: &LibraryName,
        workdir: &Path,
    ) -> Result<Vec<DeclaredDependency>, PinnerError> {
        if !workdir.join(&self.manifest).is_file() {
            tracing::debug!(library = %library, manifest = %self.manifest, "no manifest, no dependencies");
            return Ok(Vec::new());
        }

        let (program, args) = self.command.split_first().ok_or_else(|| PinnerError::Config {
            message: "probe command is empty".to_string(),
        })?;

        let output = CommandBuilder::new(program.as_str())
            .args(args.iter().map(String::as_str))
            .env(MODE_ENV, "report")
            .cwd(workdir)
            .run()
            .map_err(|e| PinnerError::ManifestProbe {
                library: library.to_string(),
                message: e.to_string(),
            })?;

        parse_probe_output(library, &output, self.delimiter)
    }
}

/// Parse probe output into declared dependencies.
///
/// A non-blank line without the delimiter, or with an empty name or
/// constraint, fails the whole probe.
pub fn parse_probe_output(
    library: &LibraryName,
    output: &[u8],
    delimiter: char,
) -> Result<Vec<DeclaredDependency>, PinnerError> {
    text::lines(output)
        .enumerate()
        .map(|(i, line)| match text::split_field(&line, delimiter) {
            Some((name, constraint)) if !constraint.is_empty() => {
                Ok(DeclaredDependency::new(name, constraint))
            }
            _ => Err(PinnerError::ManifestProbe {
                library: library.to_string(),
                message: format!("line {} is not '<name>{delimiter}<constraint>': {line:?}", i + 1),
            }),
        })
        .collect()
}
