use std::sync::Arc;

use crate::application::services::DeepLinkService;

/// Shared state of the demo application.
#[derive(Clone)]
pub struct AppState {
    pub deep_link: DeepLinkService,
    /// Name of the cookie the login form sets and the authenticator checks.
    pub session_cookie: Arc<str>,
}

impl AppState {
    pub fn new(deep_link: DeepLinkService, session_cookie: impl Into<Arc<str>>) -> Self {
        Self {
            deep_link,
            session_cookie: session_cookie.into(),
        }
    }
}
