//! Shared structs.

use serde::Serialize;

/// Which path produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Backend,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct FlowOutcome<R> {
    pub response: R,
    pub source: ResponseSource,
}
