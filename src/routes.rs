//! Top-level router configuration for the demo server.
//!
//! # Route Structure
//!
//! - `GET  /`, `/account`, `/reports` - Pages (sign-in required)
//! - `GET  /login`                    - Login page
//! - `POST /login`, `/logout`         - Sign in / sign out
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Deep link** - Login redirect with return URL cookie

use crate::middleware::{deep_link, tracing};
use crate::state::AppState;
use crate::web;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// The deep link middleware wraps every route, including the login page;
/// it lets the login page through for anonymous users on its own.
pub fn app_router(state: AppState) -> Router {
    let deep_link_service = state.deep_link.clone();

    Router::new()
        .merge(web::routes::protected_routes())
        .merge(web::routes::public_routes())
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            deep_link_service,
            deep_link::layer,
        ))
        .layer(tracing::layer())
}
