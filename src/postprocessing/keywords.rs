//! Line-by-line keyword classification for single-paragraph outputs.

use super::OutputField;
use std::collections::HashMap;

/// Assigns lines to output fields by keyword membership.
///
/// Fields are tested in declaration order and the first field whose keyword
/// appears in the lowercased line wins. Only the first line won by a field is
/// kept; later lines won by the same field are ignored.
pub fn classify(text: &str, outputs: &[OutputField]) -> HashMap<&'static str, String> {
    let mut found: HashMap<&'static str, String> = HashMap::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let lower = line.to_lowercase();
        let Some(output) = outputs
            .iter()
            .find(|output| output.keywords.iter().any(|k| lower.contains(k)))
        else {
            continue;
        };

        if found.contains_key(output.name) {
            continue;
        }

        let value = strip_label(line);
        if !value.is_empty() {
            found.insert(output.name, value.to_string());
        }
    }

    found
}

/// Drops list bullets and a short leading `Label:` from a line.
fn strip_label(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '*' | '•'));
    match line.split_once(':') {
        Some((label, value)) if label.chars().count() <= 40 && !value.trim().is_empty() => {
            value.trim().trim_matches('*').trim()
        }
        _ => line.trim_matches('*').trim(),
    }
}
