//! Demo web route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    account_handler, home_handler, login_page_handler, login_submit_handler, logout_handler,
    reports_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages that require a signed-in user.
///
/// Protection comes from the deep link middleware wrapping the whole app,
/// not from these routes themselves.
///
/// # Endpoints
///
/// - `GET /` - Home page
/// - `GET /account` - Account page
/// - `GET /reports` - Reports page
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/account", get(account_handler))
        .route("/reports", get(reports_handler))
}

/// Sign-in and sign-out endpoints.
///
/// # Endpoints
///
/// - `GET /login` - Login page
/// - `POST /login` - Sign in
/// - `POST /logout` - Sign out
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page_handler).post(login_submit_handler))
        .route("/logout", post(logout_handler))
}
