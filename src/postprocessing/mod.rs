//! Turns raw backend text into per-field display text.
//!
//! Extraction order: a JSON object keyed by field names, then the flow's
//! layout strategy (labeled sections or keyword lines). Fields still empty
//! afterwards get the placeholder policy: the primary field takes a truncated
//! prefix of the raw text, every other field takes [`PLACEHOLDER`].

pub mod formatter;
pub mod interpreter;
pub mod keywords;
pub mod sections;

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

/// Text used for a secondary field the backend did not provide.
pub const PLACEHOLDER: &str = "No further details were provided for this section.";

/// Maximum characters of raw text copied into an empty primary field.
pub const PREFIX_CHARS: usize = 400;

/// How the backend is asked to lay out its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One `LABEL: text` section per field.
    Sections,
    /// One line per field, classified by keywords.
    Keywords,
}

/// One response field as the backend is asked to produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputField {
    pub name: &'static str,
    pub label: &'static str,
    pub describe: &'static str,
    pub keywords: &'static [&'static str],
    pub primary: bool,
}

impl OutputField {
    pub const fn primary(name: &'static str, label: &'static str, describe: &'static str) -> Self {
        Self {
            name,
            label,
            describe,
            keywords: &[],
            primary: true,
        }
    }

    pub const fn secondary(
        name: &'static str,
        label: &'static str,
        describe: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            describe,
            keywords: &[],
            primary: false,
        }
    }

    pub const fn keywords(self, keywords: &'static [&'static str]) -> Self {
        Self { keywords, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Extracted,
    RawPrefix,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldText {
    pub name: &'static str,
    pub text: String,
    pub origin: Origin,
}

/// Decomposed fields in output declaration order; every field is populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<FieldText>,
}

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d[\d,]*").unwrap());

const AFFIRMATIVE: &[&str] = &["yes", "true", "likely", "probably"];
const NEGATIVE: &[&str] = &["no", "false", "unlikely", "not", "never", "won", "wont", "doubtful"];

impl FieldMap {
    pub fn iter(&self) -> impl Iterator<Item = &FieldText> {
        self.fields.iter()
    }

    fn get(&self, name: &str) -> Option<&FieldText> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Display text for `name`; unknown names read as the placeholder.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map_or(PLACEHOLDER, |f| f.text.as_str())
    }

    pub fn origin(&self, name: &str) -> Option<Origin> {
        self.get(name).map(|f| f.origin)
    }

    /// Text for `name` only if the backend actually supplied it.
    pub fn extracted(&self, name: &str) -> Option<&str> {
        self.get(name)
            .filter(|f| f.origin == Origin::Extracted)
            .map(|f| f.text.as_str())
    }

    /// First whole number in the extracted text, if it lies within `bounds`.
    pub fn integer(&self, name: &str, bounds: RangeInclusive<i64>) -> Option<i64> {
        let text = self.extracted(name)?;
        let digits = INTEGER.find(text)?.as_str().replace(',', "");
        digits.parse::<i64>().ok().filter(|n| bounds.contains(n))
    }

    /// Reads a yes/no answer from the extracted text.
    ///
    /// The first clause that says anything decides, and a negation anywhere
    /// in that clause beats an affirmative ("likely, but will not skip").
    pub fn flag(&self, name: &str) -> Option<bool> {
        let text = self.extracted(name)?.to_lowercase();
        text.split(|c: char| matches!(c, '.' | ';' | '\n' | '!' | '?'))
            .find_map(|clause| {
                let mut answer = None;
                for word in clause.split(|c: char| !c.is_alphanumeric()) {
                    if NEGATIVE.contains(&word) {
                        return Some(false);
                    }
                    if AFFIRMATIVE.contains(&word) {
                        answer = Some(true);
                    }
                }
                answer
            })
    }
}

/// Decomposes raw backend text into one entry per output field.
///
/// Returns `None` only when the text is empty after cleaning.
pub fn decompose(raw: &str, outputs: &[OutputField], layout: Layout) -> Option<FieldMap> {
    let cleaned = formatter::clean(raw);
    if cleaned.is_empty() {
        return None;
    }

    let mut found = interpreter::json_fields(&cleaned, outputs);
    if found.is_empty() {
        found = match layout {
            Layout::Sections => sections::split(&cleaned, outputs),
            Layout::Keywords => keywords::classify(&cleaned, outputs),
        };
    }

    let fields = outputs
        .iter()
        .map(|output| match found.remove(output.name) {
            Some(text) => FieldText {
                name: output.name,
                text,
                origin: Origin::Extracted,
            },
            None if output.primary => FieldText {
                name: output.name,
                text: formatter::truncate(&cleaned, PREFIX_CHARS),
                origin: Origin::RawPrefix,
            },
            None => FieldText {
                name: output.name,
                text: PLACEHOLDER.to_string(),
                origin: Origin::Placeholder,
            },
        })
        .collect();

    Some(FieldMap { fields })
}

#[cfg(test)]
mod tests;
