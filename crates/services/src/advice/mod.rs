//! Advice assistant: a client seam for the hosted model plus the relay the UI talks to.

mod gemini;
mod relay;

use async_trait::async_trait;

use crate::error::AdviceError;

pub use gemini::GeminiClient;
pub use relay::{AdviceRelay, CONNECTION_FALLBACK, EMPTY_REPLY_FALLBACK};

/// One single-turn question for the advice model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
}

/// Sends a request to a text generation backend.
#[async_trait]
pub trait AdviceClient: Send + Sync {
    /// Return the generated reply text. Blank replies are passed through as-is.
    ///
    /// # Errors
    ///
    /// Returns `AdviceError` when the backend cannot be reached or rejects the request.
    async fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}
