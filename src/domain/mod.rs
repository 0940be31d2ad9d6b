//! Domain layer: options, validation and the redirect decision.
//!
//! Nothing in here touches HTTP types. The axum adapter in
//! [`crate::middleware::deep_link`] translates requests into
//! [`request::RequestView`] and executes the returned [`decision::Decision`].
//!
//! # Architecture
//!
//! - [`options`] - Raw, caller-supplied options
//! - [`validator`] - Fail-fast validation into an immutable config
//! - [`authenticator`] - Injected authentication predicate
//! - [`request`] - Per-request input
//! - [`decision`] - Per-request output
//! - [`engine`] - The decision procedure
//!
//! # Request Flow
//!
//! 1. Options are validated once by [`validator::DeepLinkConfig::from_options`]
//! 2. Every request is turned into a [`request::RequestView`]
//! 3. [`engine::decide`] awaits the authenticator and picks a [`decision::Decision`]
//! 4. The HTTP layer sets or clears the cookie, redirects or continues

pub mod authenticator;
pub mod decision;
pub mod engine;
pub mod options;
pub mod request;
pub mod validator;
