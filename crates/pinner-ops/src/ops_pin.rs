//! Operation: resolve every dependency and check out the chosen versions.

use pinner_resolver::resolve::ResolutionResult;
use pinner_resolver::session::PinOutcome;
use pinner_util::errors::PinnerError;
use pinner_util::fs::ensure_dir;
use pinner_util::progress::Reporter;
use serde::Serialize;

use crate::ops_setup::{GlobalOptions, Project};

/// Options for `pinner pin`.
#[derive(Debug, Clone, Default)]
pub struct PinCommandOptions {
    /// Print the outcome as JSON on stdout instead of status lines.
    pub json: bool,
}

/// Machine-readable outcome of a pin run.
#[derive(Debug, Serialize)]
pub struct PinSummary<'a> {
    pub success: bool,
    pub resolution: &'a ResolutionResult,
    pub errors: Vec<String>,
}

impl<'a> PinSummary<'a> {
    pub fn new(outcome: &'a PinOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            resolution: &outcome.resolution,
            errors: outcome.errors.iter().map(describe).collect(),
        }
    }
}

/// Pin the project. Every collected error is printed before failing.
pub fn pin(opts: &GlobalOptions, pin_opts: &PinCommandOptions) -> miette::Result<()> {
    let project = Project::load(opts)?;
    let reporter = Reporter::new(opts.verbose);

    let staging = project.config.staging_root();
    ensure_dir(&staging).map_err(PinnerError::Io)?;
    tracing::debug!(staging = %staging.display(), "using staging root");

    let (git, probe) = project.collaborators();
    let pinner = project.pinner(&git, &probe)?;

    let sp = reporter.spinner(&format!(
        "Pinning {} dependencies...",
        pinner.registrations().len()
    ));
    let outcome = pinner.pin();
    sp.finish_and_clear();

    if pin_opts.json {
        let json = serde_json::to_string_pretty(&PinSummary::new(&outcome)).map_err(|e| {
            PinnerError::Generic {
                message: format!("Failed to serialize pin outcome: {e}"),
            }
        })?;
        println!("{json}");
    } else {
        print_outcome(&outcome, &reporter);
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err(PinnerError::Generic {
            message: format!("could not pin dependencies ({} errors)", outcome.errors.len()),
        }
        .into())
    }
}

fn print_outcome(outcome: &PinOutcome, reporter: &Reporter) {
    let constraints = &outcome.context.constraints;
    reporter.detail(
        "Discovered",
        &format!(
            "{} libraries with {} constraints",
            constraints.libraries().count(),
            constraints.total()
        ),
    );
    for (library, version) in outcome.resolved() {
        reporter.status("Pinned", &format!("{library} {}", version.tag));
    }
    for err in &outcome.errors {
        reporter.error("error", &describe(err));
    }
}

/// One-line error text, followed by the constraint report for conflicts.
pub fn describe(err: &PinnerError) -> String {
    match err {
        PinnerError::NoSatisfyingVersion { details, .. } => format!("{err}\n{details}"),
        _ => err.to_string(),
    }
}
