//! Blog generator library
//!
//! Generates blog posts with Google Gemini, failing over across a pool of
//! API keys when a call fails.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;
pub mod utils;

pub use config::Settings;
pub use error::ApiError;
pub use server::App;
