//! Gemini service for Google Gemini API interactions
//!
//! Thin REST client for `generateContent`. The API key is supplied per call,
//! so the service itself holds no credential state; key selection and
//! failover live in [`crate::services::KeyPool`].

use crate::config::GeminiSettings;
use crate::schemas::gemini::{GeminiError, GeminiRequest, GeminiResponse};
use crate::services::provider::{ContentProvider, UpstreamError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Gemini Service
// ============================================================================

/// Configuration for Gemini service
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model name (e.g., "gemini-1.5-flash")
    pub model: String,

    /// Base URL (default: generativelanguage.googleapis.com)
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: None,
            timeout_seconds: 60,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

impl From<&GeminiSettings> for GeminiConfig {
    fn from(settings: &GeminiSettings) -> Self {
        Self {
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            timeout_seconds: settings.request_timeout_seconds,
        }
    }
}

/// Service for interacting with Google Gemini API
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    model: String,
    base_url: Option<String>,
}

impl GeminiService {
    /// Create a new Gemini service
    pub fn new(config: GeminiConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(
            model = %config.model,
            base_url = %config.base_url.as_deref().unwrap_or(GEMINI_API_BASE),
            timeout_seconds = config.timeout_seconds,
            "Initialized Gemini service"
        );

        Ok(Self {
            client,
            model: config.model,
            base_url: config.base_url,
        })
    }

    fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/')
    }

    /// Generate content (non-streaming)
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, UpstreamError> {
        let url = format!("{}/models/{}:generateContent", self.base_url(), self.model);

        tracing::debug!(model = %self.model, url = %url, "Calling Gemini generateContent API");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            if let Ok(gemini_error) = serde_json::from_str::<GeminiError>(&body) {
                return Err(UpstreamError::Api {
                    code: gemini_error.error.code,
                    message: gemini_error.error.message,
                });
            }

            return Err(UpstreamError::Api {
                code: status.as_u16() as i32,
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Gemini response");
            UpstreamError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl ContentProvider for GeminiService {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Option<String>, UpstreamError> {
        let response = self
            .generate_content(api_key, &GeminiRequest::from_prompt(prompt))
            .await?;

        let text = response.text();
        if text.is_none() {
            tracing::warn!(
                stop_reason = response.stop_reason().unwrap_or("-"),
                "Gemini response carried no text"
            );
        }
        Ok(text)
    }
}

// ============================================================================
// Tests
// ============================================================================
