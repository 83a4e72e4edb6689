//! AI cake-suggestion gateway.
//!
//! A stateless pass-through: structured inputs (occasion, category) are
//! formatted into one natural-language prompt and sent to a generative-text
//! backend in a single call - no retry, no caching, no rate limiting. The
//! backend sits behind [`SuggestionBackend`] so tests substitute a mock and
//! deployments can point at any prompt-completion service. Each call
//! carries a request timeout, and a configured canned suggestion stands in
//! whenever the backend is unreachable, times out, or returns nothing.

use crate::{
    config::SuggestionSettings,
    errors::{Error, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::warn;

/// A suggested cake with the backend's reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeSuggestion {
    /// The suggested cake.
    pub suggestion: String,
    /// Why it fits the occasion.
    pub reason: String,
}

/// Capability interface over the generative-text service.
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    /// Completes one prompt into a suggestion. A single call, no retries.
    async fn complete(&self, prompt: &str) -> Result<CakeSuggestion>;
}

/// `reqwest`-backed prompt-completion client.
///
/// Posts `{"prompt": ...}` as JSON and expects a `CakeSuggestion`-shaped
/// JSON body back. The client-level timeout bounds the whole call.
pub struct HttpSuggestionBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestionBackend {
    /// Builds a client for `endpoint` with the given request timeout.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Suggestion {
                message: format!("Failed to build suggestion client: {e}"),
            })?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SuggestionBackend for HttpSuggestionBackend {
    async fn complete(&self, prompt: &str) -> Result<CakeSuggestion> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| Error::Suggestion {
                message: format!("Backend call failed: {e}"),
            })?
            .error_for_status()
            .map_err(|e| Error::Suggestion {
                message: format!("Backend returned an error status: {e}"),
            })?;

        let suggestion: CakeSuggestion =
            response.json().await.map_err(|e| Error::Suggestion {
                message: format!("Backend returned an unreadable response: {e}"),
            })?;

        if suggestion.suggestion.trim().is_empty() {
            return Err(Error::Suggestion {
                message: "Backend returned no suggestion.".to_string(),
            });
        }
        Ok(suggestion)
    }
}

/// Formats the single prompt sent to the backend.
#[must_use]
pub fn build_prompt(occasion: &str, category: &str) -> String {
    format!(
        "Based on the user's cake preferences, suggest a specific cake and the reason \
         for the suggestion.\n\nOccasion: {occasion}\nCake Category: {category}\n\nSuggestion:"
    )
}

/// The suggestion service the HTTP layer talks to.
pub struct SuggestionService {
    backend: Option<Arc<dyn SuggestionBackend>>,
    fallback: CakeSuggestion,
}

impl SuggestionService {
    /// Creates a service over an explicit backend (tests, custom wiring).
    #[must_use]
    pub fn new(backend: Option<Arc<dyn SuggestionBackend>>, fallback: CakeSuggestion) -> Self {
        Self { backend, fallback }
    }

    /// Wires the service from configuration: an HTTP backend when an
    /// endpoint is configured, fallback-only otherwise.
    pub fn from_settings(settings: &SuggestionSettings) -> Result<Self> {
        let backend: Option<Arc<dyn SuggestionBackend>> = match &settings.endpoint {
            Some(endpoint) => Some(Arc::new(HttpSuggestionBackend::new(
                endpoint.clone(),
                Duration::from_secs(settings.timeout_secs),
            )?)),
            None => None,
        };
        Ok(Self::new(
            backend,
            CakeSuggestion {
                suggestion: settings.fallback_suggestion.clone(),
                reason: settings.fallback_reason.clone(),
            },
        ))
    }

    /// Produces a suggestion for an occasion and catalog category.
    ///
    /// # Errors
    /// Returns [`Error::Suggestion`] when either input is empty; no backend
    /// call is attempted in that case. Backend failures do not error: the
    /// canned fallback is served instead, with a warning in the log.
    pub async fn suggest(&self, occasion: &str, category: &str) -> Result<CakeSuggestion> {
        if occasion.trim().is_empty() || category.trim().is_empty() {
            return Err(Error::Suggestion {
                message: "Occasion and category are required for a suggestion.".to_string(),
            });
        }

        let Some(backend) = &self.backend else {
            return Ok(self.fallback.clone());
        };

        let prompt = build_prompt(occasion.trim(), category.trim());
        match backend.complete(&prompt).await {
            Ok(suggestion) => Ok(suggestion),
            Err(e) => {
                warn!(error = %e, "Suggestion backend failed, serving fallback");
                Ok(self.fallback.clone())
            }
        }
    }
}
