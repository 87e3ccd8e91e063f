//! Key Pool Module
//!
//! Ordered Gemini API keys with probe-based selection and failover.
//!
//! # Example
//! ```ignore
//! use blog_generator::services::{GeminiService, KeyPool, RotationMode};
//!
//! let pool = KeyPool::from_keys(["primary", "backup"], RotationMode::FromCursor);
//! if pool.configure(&gemini).await {
//!     let active = pool.active().unwrap();
//!     println!("Using {}", active.name);
//! }
//! ```

mod credential;
mod pool;
mod strategy;

pub use credential::{ApiKeyCredential, CredentialHealth};
pub use pool::{ActiveKey, KeyPool, KeyStats, PoolStats};
pub use strategy::{scan_order, RotationMode};
