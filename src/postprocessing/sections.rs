//! Splits labeled model output ("DIET PLAN: ...") into per-field bodies.

use super::OutputField;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Heading and inline patterns for one label.
#[derive(Clone)]
struct LabelPatterns {
    heading: Regex,
    inline: Regex,
}

/// Compiled patterns per label; labels are static, so the cache stays small.
static PATTERNS: Lazy<Mutex<HashMap<&'static str, Option<LabelPatterns>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

struct Hit {
    name: &'static str,
    start: usize,
    body_start: usize,
}

/// Returns the non-empty body of every label found in `text`.
///
/// Labels match case-insensitively, first at a line start (allowing markdown
/// decoration and list numbering), then anywhere as `LABEL:`. A body runs
/// until the next found label.
pub fn split(text: &str, outputs: &[OutputField]) -> HashMap<&'static str, String> {
    let mut hits: Vec<Hit> = outputs
        .iter()
        .filter_map(|output| {
            locate(text, output.label).map(|(start, body_start)| Hit {
                name: output.name,
                start,
                body_start,
            })
        })
        .collect();

    hits.sort_by_key(|hit| hit.start);
    // A label found inside another label's header belongs to that header.
    hits.dedup_by(|later, earlier| later.start < earlier.body_start);

    let mut sections = HashMap::new();
    for (i, hit) in hits.iter().enumerate() {
        let end = hits.get(i + 1).map_or(text.len(), |next| next.start);
        let body = text[hit.body_start..end]
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | ':' | '#'));
        if !body.is_empty() {
            sections.insert(hit.name, body.to_string());
        }
    }

    sections
}

fn patterns(label: &'static str) -> Option<LabelPatterns> {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(label)
        .or_insert_with(|| compile(label))
        .clone()
}

fn compile(label: &str) -> Option<LabelPatterns> {
    let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let label_pattern = words.join(r"[ \t_-]+");

    let heading = Regex::new(&format!(
        r"(?im)^[ \t>#*_-]*(?:\d+[.)][ \t]*)?[*_]*{}[*_]*[ \t]*(?::|[ \t]+[-–][ \t]|\r?$)",
        label_pattern
    ))
    .ok()?;
    let inline = Regex::new(&format!(r"(?i)\b{}[*_]*[ \t]*:", label_pattern)).ok()?;

    Some(LabelPatterns { heading, inline })
}

/// Byte offsets of the label match start and of the body that follows it.
fn locate(text: &str, label: &'static str) -> Option<(usize, usize)> {
    let patterns = patterns(label)?;
    patterns
        .heading
        .find(text)
        .or_else(|| patterns.inline.find(text))
        .map(|m| (m.start(), m.end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUTS: &[OutputField] = &[
        OutputField::primary("rest_suggestion", "REST PERIOD", "rest"),
        OutputField::secondary("pace_note", "PACE NOTE", "pace"),
    ];

    #[test]
    fn patterns_are_compiled_once_per_label() {
        let first = split("REST PERIOD: 90 s\nPACE NOTE: steady", OUTPUTS);
        let cached = PATTERNS
            .lock()
            .unwrap()
            .get("REST PERIOD")
            .cloned()
            .flatten()
            .expect("label cached after first split");

        let second = split("pace note: slower\nrest period: 2 min", OUTPUTS);
        let again = PATTERNS.lock().unwrap().get("REST PERIOD").cloned().flatten().unwrap();

        assert_eq!(cached.heading.as_str(), again.heading.as_str());
        assert_eq!(first["rest_suggestion"], "90 s");
        assert_eq!(second["rest_suggestion"], "2 min");
        assert_eq!(second["pace_note"], "slower");
    }
}
