/*!
 * Mock provider implementations for testing.
 *
 * This module provides a deterministic provider that never touches the network:
 * - `MockProvider::echo()` - Returns the user payload unchanged
 * - `MockProvider::fixed(..)` - Always returns the same text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::fail_on_call(n)` - Fails only for the n-th call (1-based)
 * - `MockProvider::with_responder(..)` - Custom response generator
 *
 * Every call is recorded so tests can assert on the number and content of requests.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Echo the user payload
    Echo,
    /// Always answer with the given text
    Fixed(String),
    /// Always fail
    Failing,
    /// Fail only on the given 1-based call number, echo otherwise
    FailOnCall(usize),
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Requests received so far (shared between clones)
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Custom response generator (optional, overrides `Echo`/`Fixed`)
    responder: Option<fn(&CompletionRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: None,
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall(call))
    }

    /// Use a custom function to produce successful answers
    pub fn with_responder(mut self, responder: fn(&CompletionRequest) -> String) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn answer(&self, request: &CompletionRequest) -> String {
        if let Some(responder) = self.responder {
            return responder(request);
        }
        match &self.behavior {
            MockBehavior::Fixed(text) => text.clone(),
            _ => request.user.clone(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let call_number = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
            calls.push(request.clone());
            calls.len()
        };

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::FailOnCall(n) if n == call_number => Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Simulated failure (request #{})", call_number),
            }),
            _ => Ok(self.answer(&request)),
        }
    }
}
