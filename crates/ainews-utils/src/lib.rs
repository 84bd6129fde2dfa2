//! Shared utilities for ainews-rs
//!
//! This crate provides common functionality used across the ainews-rs workspace,
//! including logging setup and process-level configuration.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{init_tracing, init_tracing_with};
