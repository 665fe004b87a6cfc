//! Converts collected request details into structured prompt blocks.

use super::schema::{Block, PromptPayload};
use super::templates::{keywords_instruction, sections_instruction};
use crate::postprocessing::{Layout, OutputField};

pub fn format_payload(
    system: String,
    facts: Vec<(String, String)>,
    guidance: Vec<String>,
) -> PromptPayload {
    let mut payload = PromptPayload {
        system,
        blocks: Vec::new(),
    };

    if !facts.is_empty() {
        payload
            .blocks
            .push(("User details".into(), Block::Facts(facts)));
    }

    if !guidance.is_empty() {
        payload
            .blocks
            .push(("Coaching guidance".into(), Block::Guidance(guidance)));
    }

    payload
}

/// The enumerated output structure appended to every prompt.
pub fn response_format(outputs: &[OutputField], layout: Layout) -> String {
    let instruction = match layout {
        Layout::Sections => sections_instruction(),
        Layout::Keywords => keywords_instruction(),
    };

    let mut text = format!("## Response format\n{}\n", instruction);
    for (i, output) in outputs.iter().enumerate() {
        text.push_str(&format!("{}. {}: {}\n", i + 1, output.label, output.describe));
    }
    text
}
