//! Text-generation providers
//!
//! The estimator only needs one thing from a provider: send a fully
//! rendered prompt, get one block of text back. Authentication, latency and
//! model behavior stay behind [`TextGenerator`].

mod ollama;
mod openai;

pub use ollama::OllamaGenerator;
pub use openai::OpenAiGenerator;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::errors::{CalcError, CalcResult};

/// Shared generator handle
pub type SharedGenerator = Arc<dyn TextGenerator>;

/// Provider-level failure. The estimator collapses all of these into
/// [`CalcError::GenerationFailed`].
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else if err.is_decode() {
            GenerationError::MalformedResponse(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

/// Prompt-completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt`, returning the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared generator from configuration.
pub fn create_generator(config: &GeneratorConfig) -> CalcResult<SharedGenerator> {
    config.validate()?;
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiGenerator::new(config.clone())?)),
        "ollama" => Ok(Arc::new(OllamaGenerator::new(config.clone())?)),
        other => Err(CalcError::config(format!(
            "Unknown provider: {}. Supported: openai, ollama",
            other
        ))),
    }
}

/// Reject blank generations; anything else passes through untouched.
pub(crate) fn non_empty(text: Option<String>) -> Result<String, GenerationError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GenerationError::EmptyResponse),
    }
}
