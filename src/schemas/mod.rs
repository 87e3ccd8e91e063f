//! Request and response schemas
//!
//! Wire formats for the upstream Gemini API and the blog form endpoint.

pub mod blog;
pub mod gemini;

pub use blog::{BlogRequest, BlogResponse};
pub use gemini::{GeminiRequest, GeminiResponse};
