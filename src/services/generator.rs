//! Blog generation with API key failover
//!
//! Runs one request through validation, prompt rendering and a bounded
//! retry loop: at most one generation call per key in the pool, rotating to
//! the next working key after each failure.

use crate::schemas::blog::{BlogRequest, MISSING_TOPIC_MESSAGE};
use crate::services::key_pool::KeyPool;
use crate::services::provider::ContentProvider;
use crate::utils::clip;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Longest upstream message carried into a user-facing error
const MAX_ERROR_DETAIL_CHARS: usize = 500;

// ============================================================================
// Error Types
// ============================================================================

/// Terminal failure of a generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No key passed its probe; nothing is attempted
    #[error("API not configured properly. Please check your Gemini API keys.")]
    NotConfigured,

    /// Input rejected before any upstream call
    #[error("{0}")]
    Validation(String),

    /// The upstream answered but without text
    #[error("No response received from the AI model")]
    EmptyResponse,

    /// Rotation probed every key and none is usable
    #[error("All API keys are currently unavailable. Please try again later.")]
    KeysUnavailable,

    /// One call per key was made and every one failed
    #[error("Failed to generate blog post after trying all API keys: {last_error}")]
    Exhausted { last_error: String },

    /// The whole request ran past the configured deadline
    #[error("Generation timed out, please try again")]
    TimedOut,
}

// ============================================================================
// Generator
// ============================================================================

/// Generates blog posts through whichever key the pool currently has bound
pub struct BlogGenerator {
    pool: Arc<KeyPool>,
    provider: Arc<dyn ContentProvider>,
}

impl BlogGenerator {
    pub fn new(pool: Arc<KeyPool>, provider: Arc<dyn ContentProvider>) -> Self {
        Self { pool, provider }
    }

    pub fn pool(&self) -> &Arc<KeyPool> {
        &self.pool
    }

    /// Probe the pool from the first key and bind the first one that works
    pub async fn configure(&self) -> bool {
        self.pool.configure(self.provider.as_ref()).await
    }

    /// Validate `request`, build its prompt and generate with failover.
    pub async fn generate(&self, request: &BlogRequest) -> Result<String, GenerationError> {
        if !self.pool.is_configured() {
            tracing::error!("API not configured");
            return Err(GenerationError::NotConfigured);
        }

        if request.validate().is_err() {
            tracing::info!("No topic provided");
            return Err(GenerationError::Validation(MISSING_TOPIC_MESSAGE.to_string()));
        }

        tracing::info!(
            topic = %request.topic,
            style = %request.style,
            length = %request.length,
            "Generating blog post"
        );

        let prompt = request.prompt();
        let max_attempts = self.pool.len();
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            // Another request may have exhausted the pool since the last check
            let Some(key) = self.pool.active() else {
                return Err(GenerationError::KeysUnavailable);
            };

            match self.provider.generate(&key.api_key, &prompt).await {
                Ok(Some(text)) => {
                    self.pool.record_outcome(key.index, true);
                    tracing::info!(
                        key = %key.name,
                        attempt,
                        chars = text.chars().count(),
                        "Blog generated successfully"
                    );
                    return Ok(text);
                }
                Ok(None) => {
                    tracing::warn!(key = %key.name, attempt, "No response from API");
                    return Err(GenerationError::EmptyResponse);
                }
                Err(e) => {
                    self.pool.record_outcome(key.index, false);
                    last_error = e.to_string();
                    tracing::warn!(
                        key = %key.name,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Generation failed"
                    );

                    if attempt < max_attempts && !self.pool.rotate(self.provider.as_ref()).await {
                        return Err(GenerationError::KeysUnavailable);
                    }
                }
            }
        }

        tracing::error!(max_attempts, "All API keys failed");
        Err(GenerationError::Exhausted {
            last_error: clip(&last_error, MAX_ERROR_DETAIL_CHARS).into_owned(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
