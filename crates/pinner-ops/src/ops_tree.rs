//! Operation: display the dependency tree.

use pinner_core::library::LibraryName;
use pinner_resolver::resolve::Resolution;
use pinner_resolver::session::PinOutcome;
use pinner_util::progress::Reporter;

use crate::ops_pin::describe;
use crate::ops_setup::{GlobalOptions, Project};

/// Options for `pinner tree`.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
}

/// Discover and resolve without checking out the resolved versions, then
/// print the graph with each library's resolved version.
pub fn tree(opts: &GlobalOptions, tree_opts: &TreeOptions) -> miette::Result<()> {
    let project = Project::load(opts)?;
    let reporter = Reporter::new(opts.verbose);
    let (git, probe) = project.collaborators();
    let pinner = project.pinner(&git, &probe)?;

    let sp = reporter.spinner("Resolving dependencies...");
    let outcome = pinner.resolve();
    sp.finish_and_clear();

    print!("{}", render(&outcome, tree_opts.depth));
    for err in &outcome.errors {
        reporter.warn("warning", &describe(err));
    }
    Ok(())
}

pub fn render(outcome: &PinOutcome, depth: Option<usize>) -> String {
    outcome.context.graph.print_tree(depth, |name| {
        match outcome.resolution.get(&LibraryName::new(name)) {
            Some(Resolution::Resolved { version }) => version.tag.clone(),
            Some(Resolution::Unsatisfiable { .. }) => "(unsatisfiable)".to_string(),
            Some(Resolution::Unavailable) | None => "(unavailable)".to_string(),
        }
    })
}
