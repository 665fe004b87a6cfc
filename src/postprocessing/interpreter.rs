//! Picks output fields out of a JSON object when the model answered in JSON.

use super::OutputField;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Returns the first JSON object found in `text`, if any.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Some(map);
    }

    // Look for JSON block markers
    if let Some(start) = trimmed.find("```json") {
        if let Some(end) = trimmed[start + 7..].find("```") {
            let block = trimmed[start + 7..start + 7 + end].trim();
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(block) {
                return Some(map);
            }
        }
    }

    // Look for raw JSON
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Some(map);
            }
        }
    }

    None
}

/// Maps JSON keys equal to output field names onto their text.
///
/// Strings are trimmed, numbers and booleans are rendered; anything else is
/// ignored. Returns an empty map when no object or no known key is present.
pub fn json_fields(text: &str, outputs: &[OutputField]) -> HashMap<&'static str, String> {
    let mut found = HashMap::new();
    let Some(object) = extract_json_object(text) else {
        return found;
    };

    for output in outputs {
        let rendered = match object.get(output.name) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => continue,
        };
        if !rendered.is_empty() {
            found.insert(output.name, rendered);
        }
    }

    found
}
