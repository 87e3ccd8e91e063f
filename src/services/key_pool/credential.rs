//! API key credentials and their health counters

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

// ============================================================================
// Credential Health
// ============================================================================

/// Outcome counters for a credential
///
/// Counters are informational: they feed the readiness report and logs,
/// they never take a key out of rotation on their own.
#[derive(Debug, Default)]
pub struct CredentialHealth {
    /// Consecutive failures since the last success
    failure_count: AtomicU32,
    /// Total successful calls and probes
    success_total: AtomicU32,
}

impl CredentialHealth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::SeqCst)
    }

    pub fn success_total(&self) -> u32 {
        self.success_total.load(Ordering::SeqCst)
    }

    pub fn record_failure(&self) {
        self.failure_count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::SeqCst);
        self.success_total.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// API Key Credential
// ============================================================================

/// A named API key. The key itself never shows up in `Debug` output.
pub struct ApiKeyCredential {
    /// Credential name for identification in logs
    name: String,
    /// The API key
    api_key: String,
    health: CredentialHealth,
}

impl ApiKeyCredential {
    pub fn new(api_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
            health: CredentialHealth::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn health(&self) -> &CredentialHealth {
        &self.health
    }
}

impl fmt::Debug for ApiKeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyCredential")
            .field("name", &self.name)
            .field("api_key", &"<redacted>")
            .field("health", &self.health)
            .finish()
    }
}
