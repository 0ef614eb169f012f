//! Handler for `pinner report`.

use miette::Result;
use pinner_ops::ops_report;
use pinner_ops::ops_setup::GlobalOptions;

pub fn exec(global: &GlobalOptions) -> Result<()> {
    ops_report::report(global)
}
