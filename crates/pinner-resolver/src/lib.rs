//! Pin resolution engine: per-library version catalogs, aggregation of every
//! constraint expressed against a library, depth-first transitive discovery,
//! and selection of the highest version satisfying all of them.

pub mod cache;
pub mod catalog;
pub mod conflict;
pub mod constraints;
pub mod context;
pub mod discover;
pub mod graph;
pub mod materialize;
pub mod resolve;
pub mod session;
