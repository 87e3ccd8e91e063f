//! Middleware module
//!
//! HTTP middleware shared by every route.

pub mod logging;

pub use logging::{log_request, RequestId, REQUEST_ID_HEADER};
