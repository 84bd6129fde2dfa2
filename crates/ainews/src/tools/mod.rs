//! Tools exposed to calling agents

pub mod get_ai_news;

pub use get_ai_news::{GetAINewsTool, TOOL_NAME};
