//! Fluent prompt assembly: request details → guidance → response format.

use super::{
    formatter::{format_payload, response_format},
    injector::inject,
    schema::PromptSpec,
    templates::coach_system,
};
use crate::postprocessing::{Layout, OutputField};
use std::fmt::Display;

/// Collects the details of one request and renders a [`PromptSpec`].
///
/// Absent optional details are left out entirely rather than rendered as a
/// filler value.
pub struct PromptBuilder {
    system: String,
    facts: Vec<(String, String)>,
    guidance: Vec<String>,
}

impl PromptBuilder {
    pub fn new(task: &str) -> Self {
        Self {
            system: coach_system(task),
            facts: Vec::new(),
            guidance: Vec::new(),
        }
    }

    pub fn fact(mut self, label: &str, value: impl Display) -> Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.facts.push((label.to_string(), value));
        }
        self
    }

    pub fn optional_fact<T: Display>(self, label: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.fact(label, value),
            None => self,
        }
    }

    pub fn list_fact(self, label: &str, items: &[String]) -> Self {
        self.fact(label, items.join(", "))
    }

    pub fn guidance(mut self, line: impl Into<String>) -> Self {
        self.guidance.push(line.into());
        self
    }

    pub fn build(self, outputs: &'static [OutputField], layout: Layout) -> PromptSpec {
        let payload = format_payload(self.system, self.facts, self.guidance);
        let mut text = inject(payload);
        text.push_str(&response_format(outputs, layout));

        PromptSpec {
            text,
            outputs,
            layout,
        }
    }
}
