//! Read-only view of the request state the decision engine looks at.

use std::collections::HashMap;

/// The parts of an incoming request the engine needs.
///
/// Built once per request by the HTTP adapter and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestView {
    /// HTTP method, compared case-insensitively.
    pub method: String,
    /// Request path, compared case-insensitively and slash-normalized.
    pub path: String,
    /// Raw path and query as requested; stored verbatim in the return cookie.
    pub original_url: String,
    /// Raw cookie values keyed by cookie name.
    pub cookies: HashMap<String, String>,
}

impl RequestView {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        original_url: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            original_url: original_url.into(),
            cookies: HashMap::new(),
        }
    }

    /// Shorthand for a `GET` whose original URL equals its path.
    pub fn get(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new("GET", path.clone(), path)
    }

    pub fn with_original_url(mut self, original_url: impl Into<String>) -> Self {
        self.original_url = original_url.into();
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("get")
    }
}
