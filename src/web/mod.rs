//! Demo web application mounted behind the deep link middleware.
//!
//! Serves a few static pages and a local login page so the redirect flow can
//! be tried in a browser.
//!
//! # Modules
//!
//! - [`auth`] - Session cookie authentication predicate
//! - [`handlers`] - Page and login handlers
//! - [`routes`] - Route configuration

pub mod auth;
pub mod handlers;
pub mod routes;
