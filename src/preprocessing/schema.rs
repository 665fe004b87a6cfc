//! Static field tables describing each flow's request shape.

/// Semantic type of a request field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text; trimmed, must be non-empty when present.
    Text,
    /// Any JSON number within the inclusive bounds.
    Number { min: f64, max: f64 },
    /// A whole JSON number within the inclusive bounds.
    Integer { min: i64, max: i64 },
    /// A non-empty array of non-empty strings.
    TextList,
    /// A base64 `data:image/...` URI.
    ImageDataUri,
}

impl FieldKind {
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number { .. } => "number",
            FieldKind::Integer { .. } => "integer",
            FieldKind::TextList => "list of text",
            FieldKind::ImageDataUri => "image data URI",
        }
    }
}

/// One named request field with its constraints and purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub purpose: &'static str,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind, purpose: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            purpose,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind, purpose: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            purpose,
        }
    }
}
