//! Application layer services.
//!
//! Wraps the domain decision procedure behind a shareable service that the
//! HTTP middleware holds as its state.
//!
//! # Available Services
//!
//! - [`services::deep_link_service::DeepLinkService`] - Validated options plus per-request decisions

pub mod services;
