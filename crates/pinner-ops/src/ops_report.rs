//! Operation: print the project's top-level registrations.
//!
//! The output is the probe protocol itself, so a library's own `pinner report`
//! answers the probe of every project depending on it.

use crate::ops_setup::{GlobalOptions, Project};

/// Print `<name><delimiter><constraint>` for every manifest dependency.
pub fn report(opts: &GlobalOptions) -> miette::Result<()> {
    let project = Project::load(opts)?;
    print!("{}", render(&project)?);
    Ok(())
}

/// The report text of `project`. Fails on the first malformed constraint.
pub fn render(project: &Project) -> miette::Result<String> {
    let (git, probe) = project.collaborators();
    let pinner = project.pinner(&git, &probe)?;
    Ok(pinner.report())
}
