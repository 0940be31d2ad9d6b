//! The outcome of the decision engine for a single request.

use crate::domain::options::CookieOptions;

/// What the HTTP layer should do with a request.
///
/// Produced per request and executed by the caller; nothing here is
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Hand the request on to the next handler untouched.
    PassThrough,
    /// Redirect without touching cookies. Used to bounce an authenticated
    /// user away from the login page.
    Redirect { target: String },
    /// Clear the return URL cookie and send the user back to where they
    /// started.
    RedirectAndClearCookie { cookie_name: String, target: String },
    /// Remember the requested URL in a cookie and send the user to log in.
    SetCookieAndRedirect {
        cookie_name: String,
        cookie_value: String,
        cookie_options: CookieOptions,
        target: String,
    },
}

impl Decision {
    /// Redirect target, if the decision redirects at all.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::PassThrough => None,
            Self::Redirect { target }
            | Self::RedirectAndClearCookie { target, .. }
            | Self::SetCookieAndRedirect { target, .. } => Some(target),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}
