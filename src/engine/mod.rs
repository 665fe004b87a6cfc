//! Public façade for the engine layer.

pub mod orchestrator;
pub mod output;
pub mod traits;
pub mod types;

pub use orchestrator::Orchestrator;
pub use output::{PromptBuilder, PromptSpec};
pub use traits::Flow;
pub use types::{FlowOutcome, ResponseSource};
