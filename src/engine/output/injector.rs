//! Injects blocks into the final prompt string.

use super::schema::{Block, PromptPayload};

pub fn inject(payload: PromptPayload) -> String {
    let mut prompt = String::new();
    prompt.push_str(&payload.system);
    prompt.push_str("\n\n");

    for (title, block) in payload.blocks {
        prompt.push_str(&format!("## {}\n", title));
        match block {
            Block::Facts(facts) => {
                for (label, value) in facts {
                    prompt.push_str(&format!("{}: {}\n", label, value));
                }
            }
            Block::Guidance(lines) => {
                for line in lines {
                    prompt.push_str(&format!("- {}\n", line));
                }
            }
        }
        prompt.push('\n');
    }

    prompt
}
