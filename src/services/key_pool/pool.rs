//! Key Pool Implementation
//!
//! Ordered API keys with a cursor and a configured flag. The pool binds the
//! first key that passes a liveness probe and moves to another one when the
//! caller reports that the active key failed.

use super::credential::ApiKeyCredential;
use super::strategy::{scan_order, RotationMode};
use crate::services::provider::ContentProvider;
use serde::Serialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::Mutex;

// ============================================================================
// Pool State
// ============================================================================

/// Selection state. Only written when a scan commits its result.
#[derive(Debug, Default, Clone, Copy)]
struct PoolState {
    /// Index of the active key when configured
    cursor: usize,
    /// Whether `cursor` points at a key that passed its last probe
    configured: bool,
}

/// Snapshot of the key requests should currently use
#[derive(Clone)]
pub struct ActiveKey {
    pub index: usize,
    pub name: String,
    pub api_key: String,
}

impl std::fmt::Debug for ActiveKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveKey")
            .field("index", &self.index)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Key Pool
// ============================================================================

/// An ordered pool of interchangeable API keys
///
/// Order is failover priority. Scans (`configure`, `rotate`) are serialized
/// by `scan_lock` and probe without touching the selection state; readers
/// only ever take the short `state` lock, so they never wait on a probe.
/// A scan that is dropped midway leaves the previous selection in place.
///
/// Selection is shared by every request: a rotation triggered by one
/// request changes the key the next request starts with.
#[derive(Debug)]
pub struct KeyPool {
    credentials: Vec<ApiKeyCredential>,
    mode: RotationMode,
    state: RwLock<PoolState>,
    scan_lock: Mutex<()>,
}

impl KeyPool {
    /// Create an unconfigured pool. Call [`KeyPool::configure`] before use.
    pub fn new(credentials: Vec<ApiKeyCredential>, mode: RotationMode) -> Self {
        Self {
            credentials,
            mode,
            state: RwLock::new(PoolState::default()),
            scan_lock: Mutex::new(()),
        }
    }

    /// Build a pool from raw keys, naming them `gemini_key_1`, `gemini_key_2`, ...
    pub fn from_keys<I, S>(keys: I, mode: RotationMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credentials = keys
            .into_iter()
            .enumerate()
            .map(|(idx, key)| ApiKeyCredential::new(key, format!("gemini_key_{}", idx + 1)))
            .collect();
        Self::new(credentials, mode)
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Bind the first key, in priority order, that passes a probe.
    ///
    /// Returns false and leaves the pool unconfigured when none does.
    pub async fn configure(&self, provider: &dyn ContentProvider) -> bool {
        let _scan = self.scan_lock.lock().await;
        self.scan(0, provider).await
    }

    /// Move away from the active key after it failed.
    ///
    /// Scans a single full circle starting where [`RotationMode::scan_start`]
    /// says for the cursor advanced by one. Returns false once every key has
    /// failed its probe; the pool is then unconfigured.
    pub async fn rotate(&self, provider: &dyn ContentProvider) -> bool {
        let _scan = self.scan_lock.lock().await;
        if self.credentials.is_empty() {
            return false;
        }

        let advanced = (self.snapshot().cursor + 1) % self.credentials.len();
        tracing::info!(
            key = self.credentials[advanced].name(),
            mode = %self.mode,
            "Switching to next API key"
        );

        self.scan(self.mode.scan_start(advanced), provider).await
    }

    /// The key to use for the next call, `None` while unconfigured
    pub fn active(&self) -> Option<ActiveKey> {
        let state = self.snapshot();
        if !state.configured {
            return None;
        }
        self.credentials.get(state.cursor).map(|cred| ActiveKey {
            index: state.cursor,
            name: cred.name().to_string(),
            api_key: cred.api_key().to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.snapshot().configured
    }

    /// Record the outcome of a generation call made with the key at `index`
    pub fn record_outcome(&self, index: usize, success: bool) {
        if let Some(cred) = self.credentials.get(index) {
            if success {
                cred.health().record_success();
            } else {
                cred.health().record_failure();
            }
        }
    }

    /// Get pool statistics
    pub fn stats(&self) -> PoolStats {
        let state = self.snapshot();
        let active = state
            .configured
            .then(|| self.credentials.get(state.cursor))
            .flatten();

        PoolStats {
            total: self.credentials.len(),
            configured: state.configured,
            active_index: active.map(|_| state.cursor),
            active_key: active.map(|c| c.name().to_string()),
            rotation_mode: self.mode,
            keys: self
                .credentials
                .iter()
                .map(|c| KeyStats {
                    name: c.name().to_string(),
                    consecutive_failures: c.health().failure_count(),
                    successes: c.health().success_total(),
                })
                .collect(),
        }
    }

    fn snapshot(&self) -> PoolState {
        *self.read_state()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, PoolState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, cursor: usize, configured: bool) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.cursor = cursor;
        state.configured = configured;
    }

    /// Probe each slot once, starting at `start`; bind the first that passes.
    ///
    /// The caller holds `scan_lock`.
    async fn scan(&self, start: usize, provider: &dyn ContentProvider) -> bool {
        for idx in scan_order(start, self.credentials.len()) {
            let cred = &self.credentials[idx];
            if provider.probe(cred.api_key()).await {
                cred.health().record_success();
                self.commit(idx, true);
                tracing::info!(key = cred.name(), index = idx, "API key configured");
                return true;
            }
            cred.health().record_failure();
            tracing::warn!(key = cred.name(), index = idx, "API key failed probe");
        }

        self.commit(0, false);
        tracing::error!(key_count = self.credentials.len(), "All API keys failed to configure");
        false
    }
}

// ============================================================================
// Pool Statistics
// ============================================================================

/// Statistics about a key pool
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    pub total: usize,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_key: Option<String>,
    pub rotation_mode: RotationMode,
    pub keys: Vec<KeyStats>,
}

/// Per-key counters
#[derive(Debug, Clone, Serialize)]
pub struct KeyStats {
    pub name: String,
    pub consecutive_failures: u32,
    pub successes: u32,
}

// ============================================================================
// Tests
// ============================================================================
