//! CLI library components for the fieldguard harness.

pub mod commands;
pub mod logging;
pub mod report;
