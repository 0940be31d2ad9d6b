//! Demo authentication predicate.

use async_trait::async_trait;

use crate::domain::authenticator::Authenticator;
use crate::domain::request::RequestView;

/// Treats a request as signed in when a non-empty session cookie is present.
///
/// Good enough to drive the login redirect flow in the demo server; it does
/// not verify anything about the cookie's value.
#[derive(Debug, Clone)]
pub struct SessionCookieAuthenticator {
    cookie_name: String,
}

impl SessionCookieAuthenticator {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl Authenticator for SessionCookieAuthenticator {
    async fn is_authenticated(&self, request: &RequestView) -> bool {
        request
            .cookie(&self.cookie_name)
            .is_some_and(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_cookie_presence() {
        let authenticator = SessionCookieAuthenticator::new("session");

        assert!(!authenticator.is_authenticated(&RequestView::get("/")).await);
        assert!(
            !authenticator
                .is_authenticated(&RequestView::get("/").with_cookie("session", ""))
                .await
        );
        assert!(
            authenticator
                .is_authenticated(&RequestView::get("/").with_cookie("session", "alice"))
                .await
        );
    }
}
