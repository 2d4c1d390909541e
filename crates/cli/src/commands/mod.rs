//! CLI command implementations

pub mod analytics;
pub mod predict;
pub mod service;
