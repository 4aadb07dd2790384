// XsimWatch - core/mod.rs
//
// Core business logic layer: host detection, log set discovery, change
// tracking, and line classification.
// Dependencies: standard library, regex, chrono, tracing.
// Must NOT depend on: ui, app, or platform implementations.

pub mod classifier;
pub mod fs;
pub mod host;
pub mod layout;
pub mod model;
pub mod registry;
