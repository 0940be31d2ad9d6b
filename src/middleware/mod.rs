//! HTTP middleware.
//!
//! - [`deep_link`] - Login redirect with return URL cookie
//! - [`tracing`] - Structured request/response logging

pub mod deep_link;
pub mod tracing;
