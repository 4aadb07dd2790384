// XsimWatch - platform/mod.rs
//
// Platform abstraction layer: real filesystem, window title listing, external
// editor launching, config directories.
// Dependencies: core capability traits, standard library, directories, walkdir.
// Must NOT depend on: app, ui.

pub mod config;
pub mod editor;
pub mod fs;
pub mod window_titles;
