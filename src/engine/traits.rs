//! Shared traits.

use super::output::PromptSpec;
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::FieldSpec;
use serde::{de::DeserializeOwned, Serialize};

/// One coaching endpoint, described as data plus three pure functions.
///
/// The orchestrator drives every flow the same way: validate against
/// `FIELDS`, render `prompt`, ask the backend, decompose the answer along
/// `OUTPUTS`, and `assemble`. Whenever the backend path cannot produce a
/// result, `fallback` answers instead.
///
/// `fallback` must be deterministic and total over every request that passes
/// validation.
pub trait Flow: Send + Sync + 'static {
    type Request: DeserializeOwned + Send + Sync;
    type Response: Serialize + Send;

    /// Endpoint name, e.g. `diet-plan`.
    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];
    const OUTPUTS: &'static [OutputField];
    const LAYOUT: Layout;

    fn prompt(request: &Self::Request) -> PromptSpec;

    fn fallback(request: &Self::Request) -> Self::Response;

    /// Builds the response from decomposed backend text.
    fn assemble(request: &Self::Request, fields: &FieldMap) -> Self::Response;
}
