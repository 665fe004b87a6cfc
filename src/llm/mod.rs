//! # Text-generation backend
//!
//! The coaching flows only ever need one thing from a language model: turn a
//! prompt into free text. This module defines that seam and the HTTP client
//! behind it.
//!
//! - `send`: [`HttpBackend`], which posts a prompt to the configured provider
//! - `receive`: request/response wire types for each provider
//!
//! ## Architecture
//!
//! ```text
//! PromptSpec → Backend::generate → raw text → postprocessing::decompose
//! ```
//!
//! A backend that reports `is_configured() == false` is never called; the
//! orchestrator takes the fallback path directly. A failed call is reported
//! as a [`BackendError`] and is never surfaced to the end user.

pub mod receive;
pub mod send;

use async_trait::async_trait;

pub use receive::*;
pub use send::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no backend credential configured")]
    Unavailable,

    #[error("backend call failed: {0}")]
    Call(String),
}

/// Anything that can turn a prompt into free text.
///
/// # Contract
/// * `is_configured` is cheap and performs no I/O.
/// * `generate` makes at most one attempt; retries are not the caller's
///   expectation.
/// * Implementations must be shareable across concurrent invocations.
#[async_trait]
pub trait Backend: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}
