#![allow(dead_code)]

use axum::http::header::SET_COOKIE;
use axum::{Router, middleware, routing::get};
use axum_test::{TestResponse, TestServer};
use cookie::Cookie;
use deep_link::DeepLinkService;
use deep_link::config::Config;
use deep_link::domain::options::DeepLinkOptions;
use deep_link::middleware::deep_link as deep_link_middleware;
use deep_link::routes::app_router;
use deep_link::state::AppState;
use deep_link::web::auth::SessionCookieAuthenticator;

pub const SESSION_COOKIE: &str = "session";

/// Options authenticated by the presence of the `session` cookie.
pub fn session_options() -> DeepLinkOptions {
    DeepLinkOptions::new().authenticated(SessionCookieAuthenticator::new(SESSION_COOKIE))
}

/// A tiny app behind the middleware, with a page, a login page and a favicon.
pub fn create_test_server(options: DeepLinkOptions) -> TestServer {
    let service = DeepLinkService::new(options).unwrap();

    let app = Router::new()
        .route("/", get(|| async { "home" }))
        .route(
            "/account",
            get(|| async { "account" }).post(|| async { "posted" }),
        )
        .route("/login", get(|| async { "login page" }))
        .route("/favicon.ico", get(|| async { "icon" }))
        .layer(middleware::from_fn_with_state(service, deep_link_middleware::layer));

    TestServer::new(app).unwrap()
}

pub fn demo_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        login: "/login".to_string(),
        login_home: None,
        cookie_name: "returnUrl".to_string(),
        cookie_secure: false,
        base_url: None,
        session_cookie: SESSION_COOKIE.to_string(),
    }
}

/// The full demo application.
pub fn create_demo_server(config: &Config) -> TestServer {
    let service = deep_link::server::deep_link_service(config).unwrap();
    let state = AppState::new(service, config.session_cookie.as_str());

    TestServer::new(app_router(state)).unwrap()
}

/// Builds a `Cookie` request header, encoding values the way the cookie
/// transport does.
pub fn cookie_header(cookies: &[(&str, &str)]) -> String {
    cookies
        .iter()
        .map(|&(name, value)| Cookie::new(name, value).encoded().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// All cookies set by a response, with transport encoding removed.
pub fn set_cookies(response: &TestResponse) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .collect()
}

pub fn set_cookie(response: &TestResponse, name: &str) -> Option<Cookie<'static>> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.name() == name)
}
