//! Handler for `pinner tree`.

use miette::Result;
use pinner_ops::ops_setup::GlobalOptions;
use pinner_ops::ops_tree::{self, TreeOptions};

pub fn exec(global: &GlobalOptions, depth: Option<usize>) -> Result<()> {
    ops_tree::tree(global, &TreeOptions { depth })
}
