//! High-level coordinator: validate → prompt → backend → decompose → assemble.

use super::{
    traits::Flow,
    types::{FlowOutcome, ResponseSource},
};
use crate::llm::{Backend, BackendError};
use crate::postprocessing::decompose;
use crate::preprocessing::{parse_request, ValidationError};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Runs any [`Flow`] against a shared backend.
///
/// Holds no per-request state, so one orchestrator can serve concurrent
/// invocations. Validation errors are the only failures callers ever see;
/// every backend problem ends in the flow's fallback response.
pub struct Orchestrator<B: Backend> {
    backend: B,
}

impl<B: Backend> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validates `payload` and returns the flow's response.
    pub async fn run<F: Flow>(&self, payload: &Value) -> Result<F::Response, ValidationError> {
        self.execute::<F>(payload)
            .await
            .map(|outcome| outcome.response)
    }

    /// Like [`run`](Self::run), but also reports which path answered.
    pub async fn execute<F: Flow>(
        &self,
        payload: &Value,
    ) -> Result<FlowOutcome<F::Response>, ValidationError> {
        let span = info_span!("flow", flow = F::NAME, invocation = %Uuid::new_v4());

        async move {
            let request = parse_request::<F::Request>(payload, F::FIELDS).map_err(|e| {
                debug!(fields = ?e.fields(), "Rejected invalid request");
                e
            })?;
            Ok::<_, ValidationError>(self.respond::<F>(&request).await)
        }
        .instrument(span)
        .await
    }

    /// Produces a response for an already validated request.
    pub async fn respond<F: Flow>(&self, request: &F::Request) -> FlowOutcome<F::Response> {
        let start = Instant::now();

        let (response, source) = match self.backend_path::<F>(request).await {
            Some(response) => (response, ResponseSource::Backend),
            None => (F::fallback(request), ResponseSource::Fallback),
        };

        info!(
            flow = F::NAME,
            source = ?source,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Flow completed"
        );

        FlowOutcome { response, source }
    }

    /// `None` whenever the fallback must answer instead.
    async fn backend_path<F: Flow>(&self, request: &F::Request) -> Option<F::Response> {
        if !self.backend.is_configured() {
            debug!("Backend not configured, using fallback");
            return None;
        }

        let spec = F::prompt(request);
        let raw = match self.backend.generate(&spec.text).await {
            Ok(raw) => raw,
            Err(BackendError::Unavailable) => {
                debug!("Backend unavailable, using fallback");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Backend call failed, using fallback");
                return None;
            }
        };

        match decompose(&raw, spec.outputs, spec.layout) {
            Some(fields) => Some(F::assemble(request, &fields)),
            None => {
                warn!("Backend returned no usable content, using fallback");
                None
            }
        }
    }
}
