//! Validates raw JSON payloads against a flow's field table.

use super::cleaner::Cleaner;
use super::schema::{FieldKind, FieldSpec};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Constraint {
    #[error("missing required field")]
    Missing,
    #[error("must not be empty")]
    Empty,
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("must be between {min} and {max}, got {value}")]
    OutOfRange { min: f64, max: f64, value: f64 },
    #[error("malformed value: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {constraint}")]
pub struct FieldViolation {
    pub field: String,
    pub constraint: Constraint,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }
}

/// Every violation found in one payload, in field declaration order.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Input validation failed: {}", describe(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, constraint)],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn violation(&self, field: &str) -> Option<&Constraint> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| &v.constraint)
    }
}

/// Checks `payload` against `fields` and returns the normalized object.
///
/// Absent optional fields (missing, `null`, or blank text) are left out of the
/// result. Fields not named in the table are dropped.
pub fn validate_payload(
    payload: &Value,
    fields: &[FieldSpec],
) -> Result<Map<String, Value>, ValidationError> {
    let object = payload.as_object().ok_or_else(|| {
        ValidationError::single(
            "$",
            Constraint::WrongType {
                expected: "object",
                found: json_type(payload),
            },
        )
    })?;

    let mut normalized = Map::new();
    let mut violations = Vec::new();

    for spec in fields {
        let checked = match object.get(spec.name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => check_value(&spec.kind, value),
        };

        match checked {
            Ok(Some(value)) => {
                normalized.insert(spec.name.to_string(), value);
            }
            Ok(None) if spec.required => {
                let constraint = if object.get(spec.name).map_or(true, Value::is_null) {
                    Constraint::Missing
                } else {
                    Constraint::Empty
                };
                violations.push(FieldViolation::new(spec.name, constraint));
            }
            Ok(None) => {}
            Err(constraint) => violations.push(FieldViolation::new(spec.name, constraint)),
        }
    }

    if violations.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationError { violations })
    }
}

/// Validates `payload` and deserializes the normalized object into `T`.
pub fn parse_request<T: DeserializeOwned>(
    payload: &Value,
    fields: &[FieldSpec],
) -> Result<T, ValidationError> {
    let normalized = validate_payload(payload, fields)?;
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ValidationError::single("$", Constraint::Malformed(e.to_string())))
}

/// `Ok(None)` means the value is present but blank.
fn check_value(kind: &FieldKind, value: &Value) -> Result<Option<Value>, Constraint> {
    let wrong_type = || Constraint::WrongType {
        expected: kind.expected(),
        found: json_type(value),
    };

    match *kind {
        FieldKind::Text => {
            let text = value.as_str().ok_or_else(wrong_type)?;
            let cleaned = Cleaner::clean(text);
            Ok((!cleaned.is_empty()).then(|| Value::String(cleaned)))
        }
        FieldKind::Number { min, max } => {
            let number = value.as_f64().ok_or_else(wrong_type)?;
            if number < min || number > max {
                return Err(Constraint::OutOfRange {
                    min,
                    max,
                    value: number,
                });
            }
            Ok(Some(value.clone()))
        }
        FieldKind::Integer { min, max } => {
            let number = value.as_f64().ok_or_else(wrong_type)?;
            if number.fract() != 0.0 {
                return Err(Constraint::WrongType {
                    expected: "integer",
                    found: "fractional number",
                });
            }
            if number < min as f64 || number > max as f64 {
                return Err(Constraint::OutOfRange {
                    min: min as f64,
                    max: max as f64,
                    value: number,
                });
            }
            Ok(Some(Value::from(number as i64)))
        }
        FieldKind::TextList => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            let mut cleaned = Vec::with_capacity(items.len());
            for item in items {
                let text = item.as_str().ok_or(Constraint::WrongType {
                    expected: "list of text",
                    found: "list with non-text entries",
                })?;
                let entry = Cleaner::clean(text);
                if entry.is_empty() {
                    return Err(Constraint::Malformed(
                        "list entries must not be empty".to_string(),
                    ));
                }
                cleaned.push(Value::String(entry));
            }
            Ok((!cleaned.is_empty()).then(|| Value::Array(cleaned)))
        }
        FieldKind::ImageDataUri => {
            let uri = value.as_str().ok_or_else(wrong_type)?.trim();
            if uri.is_empty() {
                return Ok(None);
            }
            check_image_data_uri(uri)?;
            Ok(Some(Value::String(uri.to_string())))
        }
    }
}

fn check_image_data_uri(uri: &str) -> Result<(), Constraint> {
    let rest = uri.strip_prefix("data:image/").ok_or_else(|| {
        Constraint::Malformed("expected a data URI starting with `data:image/`".to_string())
    })?;
    let (_, payload) = rest.split_once(";base64,").ok_or_else(|| {
        Constraint::Malformed("expected a base64-encoded data URI".to_string())
    })?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Constraint::Malformed(format!("image payload is not valid base64: {}", e)))?;
    if bytes.is_empty() {
        return Err(Constraint::Malformed("image payload is empty".to_string()));
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
