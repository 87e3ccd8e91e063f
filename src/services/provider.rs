//! Upstream content provider abstraction
//!
//! The key pool and the generator only need two things from the upstream:
//! a generation call made with an explicit key, and a cheap liveness probe.
//! Neither call binds a key; selecting the active key is the pool's job.

use async_trait::async_trait;
use thiserror::Error;

/// Prompt used for liveness probes
pub const PROBE_PROMPT: &str = "Hello";

/// Failure of a single upstream call
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: i32, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// A text-generation backend addressed with a caller-supplied API key
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate text for `prompt` using `api_key`.
    ///
    /// `Ok(None)` means the call succeeded but the response carried no text.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Option<String>, UpstreamError>;

    /// True only when a trivial prompt round-trips with text.
    async fn probe(&self, api_key: &str) -> bool {
        match self.generate(api_key, PROBE_PROMPT).await {
            Ok(Some(_)) => true,
            Ok(None) => {
                tracing::warn!("Probe returned no text");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Probe failed");
                false
            }
        }
    }
}
