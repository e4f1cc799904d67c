//! Shared utilities for tickerwatch
//!
//! This crate provides common functionality used across the tickerwatch workspace,
//! including logging setup and environment-based configuration helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_or, env_var, require_env};
pub use logging::{LOG_FORMAT_VAR, init_tracing, init_tracing_with};
