/*!
 * Provider implementations for text-generation services.
 *
 * This module contains the narrow capability the translation engine depends on:
 * - `openai`: OpenAI-compatible chat completions client
 * - `mock`: Deterministic provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single completion request as seen by every provider
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// System instruction guiding the model
    pub system: String,
    /// User payload (the text to translate)
    pub user: String,
    /// Ask the provider for a JSON-constrained answer
    pub json_response: bool,
    /// Sampling temperature
    pub temperature: f32,
}

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request and return the text of the first completion
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The completion text or an error
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod openai;
