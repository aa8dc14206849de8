// uniwatch - platform/mod.rs
//
// Platform abstraction layer: network, document decoding, filesystem
// persistence, platform directories.
// Must NOT depend on: app.

pub mod config;
pub mod document;
pub mod fetch;
pub mod store;
