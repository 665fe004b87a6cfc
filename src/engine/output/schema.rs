//! Data model for prompt sections.

use crate::postprocessing::{Layout, OutputField};

#[derive(Debug, Clone)]
pub enum Block {
    /// `Label: value` lines describing the user's request.
    Facts(Vec<(String, String)>),
    /// Coaching guidance the backend should follow.
    Guidance(Vec<String>),
}

#[derive(Debug, Default, Clone)]
pub struct PromptPayload {
    pub system: String,
    pub blocks: Vec<(String, Block)>, // title → block
}

/// A finished prompt plus the output structure the backend was asked for.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub text: String,
    pub outputs: &'static [OutputField],
    pub layout: Layout,
}

impl PromptSpec {
    /// Labels the backend was asked to emit, in order.
    pub fn sections(&self) -> Vec<&'static str> {
        self.outputs.iter().map(|output| output.label).collect()
    }
}
