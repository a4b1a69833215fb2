//! CLI command implementations.

pub mod check_config;
pub mod submit;
pub mod sweep;
