//! Core types for ainews-rs
//!
//! This crate defines the error type shared by the tool framework and the
//! crates that implement tools on top of it.

pub mod error;

pub use error::{Error, Result};
