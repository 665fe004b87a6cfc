//! Fitness coaching flows backed by a generative model.
//!
//! Every endpoint validates its request, asks the configured backend for a
//! structured answer, and decomposes that answer into typed response fields.
//! When no backend is configured, or the backend fails, a deterministic
//! rule-based response is returned instead.

pub mod config;
pub mod engine;
pub mod flows;
pub mod llm;
pub mod postprocessing;
pub mod preprocessing;

pub use config::{BackendConfig, ConfigError, Provider};
pub use engine::{Flow, FlowOutcome, Orchestrator, ResponseSource};
pub use flows::{dispatch, DispatchError, Endpoint};
pub use llm::{Backend, BackendError, HttpBackend};
pub use preprocessing::{Constraint, FieldViolation, ValidationError};

/// Validates that a backend credential is available
///
/// # Returns
/// * `Result<(), String>` - Ok if `FITCOACH_API_KEY` is set and non-empty,
///   Err describing the missing variable otherwise
///
/// Flows still answer without a credential, using their fallback path.
pub fn validate_environment() -> Result<(), String> {
    let config = BackendConfig::from_env().map_err(|e| e.to_string())?;
    if config.has_credential() {
        Ok(())
    } else {
        Err(format!(
            "Missing required environment variables: {}",
            config::ENV_API_KEY
        ))
    }
}
