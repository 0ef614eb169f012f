//! Handler for `pinner pin`.

use miette::Result;
use pinner_ops::ops_pin::{self, PinCommandOptions};
use pinner_ops::ops_setup::GlobalOptions;

pub fn exec(global: &GlobalOptions, json: bool) -> Result<()> {
    ops_pin::pin(global, &PinCommandOptions { json })
}
