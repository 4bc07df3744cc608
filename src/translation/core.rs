/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which turns a piece of
 * text and a language pair into a provider request and hands back the answer.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::ProviderSettings;
use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, Provider};

/// Text substituted for content whose provider call failed
pub const TRANSLATION_ERROR_SENTINEL: &str = "Translation error";

/// Prompt and sampling settings shared by every request
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Model identifier sent to the provider
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Ask for a JSON-constrained answer
    pub json_mode: bool,
    /// Free-form text appended to the system prompt
    pub instructions: String,
}

impl From<&ProviderSettings> for TranslationOptions {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            model: settings.model.clone(),
            temperature: settings.temperature,
            json_mode: settings.json_mode,
            instructions: settings.instructions.clone(),
        }
    }
}

/// Translation service wrapping a provider
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Provider implementation
    provider: Arc<dyn Provider>,

    /// Translation options
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create a new translation service
    pub fn new(provider: Arc<dyn Provider>, options: TranslationOptions) -> Self {
        Self { provider, options }
    }

    /// System prompt for a language pair
    pub fn system_prompt(&self, source_language: &str, target_language: &str) -> String {
        format!(
            "Translate the following text from {} to {} while keeping the same structure \
             and without including any Markdown or formatting. Never translate or modify \
             the keys of a json structure, only translate the values. {}",
            source_language, target_language, self.options.instructions
        )
    }

    /// Translate a text payload.
    ///
    /// No retry is attempted; an empty completion is reported as an error.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: self.options.model.clone(),
            system: self.system_prompt(source_language, target_language),
            user: text.to_string(),
            json_response: self.options.json_mode,
            temperature: self.options.temperature,
        };

        let start_time = Instant::now();
        let result = self.provider.complete(request).await;
        match &result {
            Ok(translated) if translated.is_empty() => {
                warn!("No translation returned from provider");
                return Err(ProviderError::EmptyResponse);
            }
            Ok(_) => debug!(
                "Translation {} -> {} received in {:?}",
                source_language,
                target_language,
                start_time.elapsed()
            ),
            Err(e) => warn!("Translation {} -> {} failed: {}", source_language, target_language, e),
        }
        result
    }
}
