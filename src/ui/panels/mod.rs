// XsimWatch - ui/panels/mod.rs

pub mod header;
pub mod log_view;
pub mod system_log;
