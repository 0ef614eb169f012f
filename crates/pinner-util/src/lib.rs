//! Shared utilities for pinner.
//!
//! Cross-cutting concerns used by every other pinner crate: the unified error
//! type, filesystem helpers, external process spawning, a line/field reader
//! for subprocess output, and terminal status output.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
pub mod text;
