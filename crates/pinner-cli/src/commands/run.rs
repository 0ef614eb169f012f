//! Handler for `pinner run`, the entry point dependents' probes invoke.

use miette::Result;
use pinner_ops::ops_run;
use pinner_ops::ops_setup::GlobalOptions;

pub fn exec(global: &GlobalOptions) -> Result<()> {
    ops_run::run(global)
}
