//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::{Settings, GEMINI_KEY_VARS};
use crate::services::{BlogGenerator, ContentProvider, GeminiConfig, GeminiService, KeyPool};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state
///
/// Cheap to clone. The key pool inside the generator is shared by every
/// request handled by this process.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Blog generator with its key pool
    pub generator: Arc<BlogGenerator>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Build the Gemini client and key pool, then probe for the first working key.
    ///
    /// A pool with no working key is not an error: requests report it instead.
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let gemini = GeminiService::new(GeminiConfig::from(&settings.gemini))?;
        Ok(Self::with_provider(settings, Arc::new(gemini)).await)
    }

    /// Same as [`AppState::new`] with an explicit upstream provider
    pub async fn with_provider(settings: Settings, provider: Arc<dyn ContentProvider>) -> Self {
        let settings = Arc::new(settings);

        // Not fatal: requests report the missing configuration
        if settings.gemini.api_keys.is_empty() {
            tracing::warn!(variables = ?GEMINI_KEY_VARS, "No Gemini API keys configured");
        }

        let pool = Arc::new(KeyPool::from_keys(
            settings.gemini.api_keys.iter().cloned(),
            settings.gemini.rotation_mode,
        ));
        tracing::info!(
            key_count = pool.len(),
            rotation_mode = %pool.mode(),
            "Initialized API key pool"
        );

        let generator = Arc::new(BlogGenerator::new(pool, provider));
        if generator.configure().await {
            tracing::info!("Gemini API configured successfully");
        } else {
            tracing::error!("No Gemini API key passed its probe; generation is disabled");
        }

        Self {
            settings,
            generator,
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Deadline for one whole generation request
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.generation_timeout_seconds)
    }
}
