//! Tool management and execution framework for ainews-rs
//!
//! This crate provides a framework for defining tools (functions) that an
//! external agent can call, registering them, and rendering their results
//! as text content.

pub mod output;
pub mod registry;
pub mod tool;

pub use output::{ToolContent, ToolDefinition, ToolOutput};
pub use registry::ToolRegistry;
pub use tool::Tool;
