//! Blog generation form and response bodies

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const DEFAULT_STYLE: &str = "informative";
pub const DEFAULT_LENGTH: &str = "500";
pub const DEFAULT_AUDIENCE: &str = "general";
pub const DEFAULT_CONTENT_TYPE: &str = "how-to";

/// Message shown when the topic field is missing or blank
pub const MISSING_TOPIC_MESSAGE: &str = "Please enter a topic!";

// ============================================================================
// Request
// ============================================================================

/// Submitted generation form
///
/// Only `topic` is required. Omitted fields fall back to the defaults above;
/// fields that are submitted empty are passed through as-is.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct BlogRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_topic"))]
    pub topic: String,

    #[serde(default = "default_style")]
    pub style: String,

    #[serde(default = "default_length")]
    pub length: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl BlogRequest {
    /// Request for `topic` with every other field at its default
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            style: default_style(),
            length: default_length(),
            audience: default_audience(),
            content_type: default_content_type(),
        }
    }

    /// Render the prompt sent upstream
    pub fn prompt(&self) -> String {
        format!(
            "Write a {style}-style blog post about: {topic}\n\
             \n\
             Requirements:\n\
             - Target length: {length} words\n\
             - Target audience: {audience}\n\
             - Content type: {content_type}\n\
             - Include a compelling headline\n\
             - Use proper paragraph structure\n\
             - Add section headings if appropriate\n\
             - Maintain a natural, human-like tone\n\
             - Make it engaging and informative\n\
             \n\
             Format the response as a proper blog post with clear sections.",
            style = self.style,
            topic = self.topic.trim(),
            length = self.length,
            audience = self.audience,
            content_type = self.content_type,
        )
    }
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

fn default_length() -> String {
    DEFAULT_LENGTH.to_string()
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    if topic.trim().is_empty() {
        let mut err = ValidationError::new("blank_topic");
        err.message = Some(Cow::Borrowed(MISSING_TOPIC_MESSAGE));
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Response
// ============================================================================

/// Body returned for every view of the generator
///
/// Exactly one field is set on a finished request; both are absent only on
/// the initial form view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BlogResponse {
    /// Initial, unsubmitted view
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            result: Some(text.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }
}
