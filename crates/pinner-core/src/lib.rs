//! Core data types for pinner.
//!
//! This crate defines what a pin run talks about: library names and the
//! source they are hosted on, released versions derived from tags, version
//! constraints, registry entries, global configuration and the `Pin.toml`
//! project manifest.
//!
//! This crate performs no version-control or subprocess I/O.

/// File name of the project manifest holding top-level registrations.
pub const MANIFEST_FILE: &str = "Pin.toml";

pub mod config;
pub mod constraint;
pub mod dependency;
pub mod library;
pub mod manifest;
pub mod version;
