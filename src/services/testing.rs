//! In-memory provider for pool and generator tests

use super::provider::{ContentProvider, UpstreamError};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted outcome of one generation call
pub enum Scripted {
    Text(&'static str),
    Empty,
    Fail(&'static str),
}

/// Provider whose probe results and generation outcomes are set by the test
///
/// Probes succeed for keys in the healthy set. Generation calls pop outcomes
/// in order; once the script runs out every call fails.
#[derive(Default)]
pub struct ScriptedProvider {
    healthy: Mutex<HashSet<String>>,
    script: Mutex<VecDeque<Scripted>>,
    probes: Mutex<Vec<String>>,
    generations: Mutex<Vec<String>>,
    probe_delay: Mutex<Duration>,
    generate_delay: Mutex<Duration>,
}

impl ScriptedProvider {
    pub fn new(healthy: &[&str]) -> Self {
        let provider = Self::default();
        provider.set_healthy(healthy);
        provider
    }

    pub fn with_script(self, script: Vec<Scripted>) -> Self {
        *self.script.lock().unwrap() = script.into();
        self
    }

    pub fn set_healthy(&self, healthy: &[&str]) {
        *self.healthy.lock().unwrap() = healthy.iter().map(|k| k.to_string()).collect();
    }

    /// Make every later probe wait `delay` before answering
    pub fn set_probe_delay(&self, delay: Duration) {
        *self.probe_delay.lock().unwrap() = delay;
    }

    /// Make every later generation call wait `delay` before answering
    pub fn set_generate_delay(&self, delay: Duration) {
        *self.generate_delay.lock().unwrap() = delay;
    }

    /// Keys probed so far, in order
    pub fn probe_calls(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }

    /// Keys used for generation calls so far, in order
    pub fn generate_calls(&self) -> Vec<String> {
        self.generations.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.probes.lock().unwrap().clear();
        self.generations.lock().unwrap().clear();
    }
}

#[async_trait]
impl ContentProvider for ScriptedProvider {
    async fn generate(&self, api_key: &str, _prompt: &str) -> Result<Option<String>, UpstreamError> {
        self.generations.lock().unwrap().push(api_key.to_string());
        let delay = *self.generate_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(Some(text.to_string())),
            Some(Scripted::Empty) => Ok(None),
            Some(Scripted::Fail(message)) => Err(UpstreamError::Api {
                code: 500,
                message: message.to_string(),
            }),
            None => Err(UpstreamError::Api {
                code: 500,
                message: "script exhausted".to_string(),
            }),
        }
    }

    async fn probe(&self, api_key: &str) -> bool {
        self.probes.lock().unwrap().push(api_key.to_string());
        let delay = *self.probe_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.healthy.lock().unwrap().contains(api_key)
    }
}
