//! Version control and manifest probing for pinner.
//!
//! The resolver only talks to the traits in [`client`] and [`probe`]; the
//! git- and subprocess-backed implementations live here as well.

pub mod client;
pub mod git;
pub mod probe;
