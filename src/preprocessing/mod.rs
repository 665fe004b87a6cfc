//! Request schema layer: field tables, validation and normalization.

pub mod cleaner;
pub mod schema;
pub mod validator;

pub use cleaner::Cleaner;
pub use schema::{FieldKind, FieldSpec};
pub use validator::{
    parse_request, validate_payload, Constraint, FieldViolation, ValidationError,
};

#[cfg(test)]
mod tests;
