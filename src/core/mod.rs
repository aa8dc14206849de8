// uniwatch - core/mod.rs
//
// Core business logic layer: extraction, normalisation, diffing.
// Must NOT depend on: app, platform, or any I/O crate directly.

pub mod diff;
pub mod extract;
pub mod isin;
pub mod model;
