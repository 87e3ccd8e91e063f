//! Utility modules
//!
//! Contains timeout handling and string helpers.

pub mod string;
pub mod timeout;

pub use string::clip;
pub use timeout::{with_timeout, TimeoutError};
