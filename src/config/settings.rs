//! Application settings and configuration
//!
//! This module provides configuration management for the application,
//! loading settings from environment variables with sensible defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use crate::schemas::gemini::models;
use crate::services::RotationMode;

/// Environment variables holding candidate Gemini API keys, in failover order
pub const GEMINI_KEY_VARS: [&str; 4] = [
    "GEMINI_API_KEY",
    "GEMINI_API_KEY_BACKUP_1",
    "GEMINI_API_KEY_BACKUP_2",
    "GEMINI_API_KEY_BACKUP_3",
];

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => anyhow::bail!("Invalid log format: {}. Expected: json or pretty", s),
        }
    }
}

/// Gemini upstream configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiSettings {
    /// Candidate API keys in failover order, blanks already removed
    #[serde(skip_serializing)]
    pub api_keys: Vec<String>,
    /// Model used for both probing and generation
    pub model: String,
    /// Base URL override (default: public Gemini endpoint)
    pub base_url: Option<String>,
    /// Per-call HTTP timeout
    pub request_timeout_seconds: u64,
    /// How the pool picks the next key after a failure
    pub rotation_mode: RotationMode,
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_keys", &format_args!("<{} redacted>", self.api_keys.len()))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("rotation_mode", &self.rotation_mode)
            .finish()
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            model: models::GEMINI_1_5_FLASH.to_string(),
            base_url: None,
            request_timeout_seconds: 60,
            rotation_mode: RotationMode::default(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,
    pub log_format: LogFormat,

    // Server settings
    pub host: String,
    pub port: u16,

    // Upstream
    pub gemini: GeminiSettings,

    /// Upper bound on one whole generation request, retries included
    pub generation_timeout_seconds: u64,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "blog-generator"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),
            log_format: env_or_default("LOG_FORMAT", "json")
                .parse()
                .unwrap_or_default(),

            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "8000")
                .parse()
                .context("Invalid PORT value")?,

            gemini: GeminiSettings {
                api_keys: collect_api_keys(GEMINI_KEY_VARS.iter().map(|var| env::var(var).ok())),
                model: env_or_default("GEMINI_MODEL", models::GEMINI_1_5_FLASH),
                base_url: env::var("GEMINI_BASE_URL").ok().filter(|v| !v.trim().is_empty()),
                request_timeout_seconds: env_or_default("GEMINI_REQUEST_TIMEOUT_SECS", "60")
                    .parse()
                    .context("Invalid GEMINI_REQUEST_TIMEOUT_SECS value")?,
                rotation_mode: env_or_default("KEY_ROTATION_MODE", "from_cursor")
                    .parse()
                    .unwrap_or_default(),
            },

            generation_timeout_seconds: env_or_default("GENERATION_TIMEOUT_SECS", "300")
                .parse()
                .context("Invalid GENERATION_TIMEOUT_SECS value")?,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }
        if self.gemini.request_timeout_seconds == 0 {
            anyhow::bail!("GEMINI_REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.generation_timeout_seconds == 0 {
            anyhow::bail!("GENERATION_TIMEOUT_SECS must be > 0");
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "blog-generator".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            host: "0.0.0.0".to_string(),
            port: 8000,
            gemini: GeminiSettings::default(),
            generation_timeout_seconds: 300,
        }
    }
}

/// Keep the non-blank candidate keys, trimmed, preserving order
fn collect_api_keys(values: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect()
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "blog-generator");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.gemini.model, "gemini-1.5-flash");
        assert_eq!(settings.gemini.rotation_mode, RotationMode::FromCursor);
        assert!(settings.gemini.api_keys.is_empty());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("moon".parse::<Environment>().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_collect_api_keys_drops_blanks() {
        let keys = collect_api_keys(vec![
            Some("primary".to_string()),
            None,
            Some("   ".to_string()),
            Some(" backup ".to_string()),
        ]);
        assert_eq!(keys, vec!["primary".to_string(), "backup".to_string()]);
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let mut settings = Settings::default();
        settings.generation_timeout_seconds = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.gemini.request_timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let mut settings = Settings::default();
        settings.gemini.api_keys = vec!["AIza-secret".to_string()];
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("AIza-secret"));
        assert!(rendered.contains("<1 redacted>"));
    }

    #[test]
    fn test_server_addr() {
        let settings = Settings::default();
        assert_eq!(settings.server_addr(), "0.0.0.0:8000");
    }
}
