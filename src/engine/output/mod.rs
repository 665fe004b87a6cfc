//! Public exports for building LLM-ready prompts.

pub mod builder;
pub mod formatter;
pub mod injector;
pub mod schema;
pub mod templates;

pub use builder::PromptBuilder;
pub use schema::{Block, PromptPayload, PromptSpec};
