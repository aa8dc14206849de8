// uniwatch - app/mod.rs
//
// Application layer: per-run orchestration.
// Dependencies: core and platform layers.

pub mod pipeline;
