//! # Deep Link
//!
//! Login redirect middleware for Axum that remembers where the user was
//! going. Anonymous navigations are sent to a login page (local path or
//! remote URL) with the requested URL saved in a cookie; once the user is
//! authenticated, the next navigation sends them back there.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Options, validation and the decision engine
//! - **Application Layer** ([`application`]) - Shareable service around a validated config
//! - **Middleware** ([`middleware`]) - Axum adapter executing decisions
//! - **Web Layer** ([`web`]) - Demo pages and login form
//!
//! ## Decisions
//!
//! For every request the engine picks one of:
//!
//! - pass through (non-`GET`, favicon, login page, or nothing to do)
//! - redirect to login, storing the return URL cookie
//! - redirect back to the return URL, clearing the cookie
//! - redirect an authenticated user away from the login page
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axum::{Router, middleware, routing::get};
//! use deep_link::prelude::*;
//!
//! let deep_link = DeepLinkService::new(
//!     DeepLinkOptions::new()
//!         .authenticated(authenticated_fn(|req| req.cookie("session").is_some()))
//!         .login(LocalLogin::new("/login").with_home(Home::Root)),
//! )?;
//!
//! let app = Router::new()
//!     .route("/account", get(account))
//!     .route("/login", get(login_page))
//!     .layer(middleware::from_fn_with_state(deep_link, deep_link::middleware::deep_link::layer));
//! ```
//!
//! ## Configuration
//!
//! The demo server binary is configured from environment variables via
//! [`config::Config`].

pub mod application;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use application::services::DeepLinkService;
pub use domain::options::DeepLinkOptions;
pub use error::{AppError, ConfigError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::DeepLinkService;
    pub use crate::domain::authenticator::{Authenticator, authenticated_fn};
    pub use crate::domain::decision::Decision;
    pub use crate::domain::options::{
        CookieOptions, CookieSettings, DeepLinkOptions, Home, LocalLogin, LoginOption,
        RemoteLogin, SameSitePolicy,
    };
    pub use crate::domain::request::RequestView;
    pub use crate::error::{AppError, ConfigError};
}
