// XsimWatch - app/mod.rs
//
// Application layer: the monitor engine and the view state it feeds.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod monitor;
pub mod state;
