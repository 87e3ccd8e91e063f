//! Services module
//!
//! Contains business logic and external service integrations.

pub mod gemini;
pub mod generator;
pub mod key_pool;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use gemini::{GeminiConfig, GeminiService};
pub use generator::{BlogGenerator, GenerationError};
pub use key_pool::{ActiveKey, ApiKeyCredential, KeyPool, PoolStats, RotationMode};
pub use provider::{ContentProvider, UpstreamError, PROBE_PROMPT};
