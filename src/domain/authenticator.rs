//! The caller-supplied authentication predicate.

use async_trait::async_trait;

use crate::domain::request::RequestView;

/// Answers whether the current request is authenticated.
///
/// This crate never verifies credentials itself. Integrators inject an
/// implementation (a session lookup, a signed cookie check, ...) and the
/// decision engine awaits it exactly once per navigational request.
///
/// Synchronous predicates can be wrapped with [`authenticated_fn`].
///
/// # Implementations
///
/// - [`AuthenticatedFn`] - adapter for plain closures
/// - [`crate::web::auth::SessionCookieAuthenticator`] - demo predicate
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns `true` when the request carries valid authentication.
    async fn is_authenticated(&self, request: &RequestView) -> bool;
}

/// Adapter turning a synchronous closure into an [`Authenticator`].
pub struct AuthenticatedFn<F>(F);

#[async_trait]
impl<F> Authenticator for AuthenticatedFn<F>
where
    F: Fn(&RequestView) -> bool + Send + Sync,
{
    async fn is_authenticated(&self, request: &RequestView) -> bool {
        (self.0)(request)
    }
}

/// Wraps a closure as an [`Authenticator`].
///
/// # Example
///
/// ```
/// use deep_link::domain::authenticator::authenticated_fn;
///
/// let authenticated = authenticated_fn(|req| req.cookie("session").is_some());
/// ```
pub fn authenticated_fn<F>(predicate: F) -> AuthenticatedFn<F>
where
    F: Fn(&RequestView) -> bool + Send + Sync,
{
    AuthenticatedFn(predicate)
}

/// Computes a login destination per request.
///
/// Backs the function-shaped legacy `login` option. Implemented for every
/// `Fn(&RequestView) -> String` closure.
pub trait LoginCallback: Send + Sync {
    fn login_url(&self, request: &RequestView) -> String;
}

impl<F> LoginCallback for F
where
    F: Fn(&RequestView) -> String + Send + Sync,
{
    fn login_url(&self, request: &RequestView) -> String {
        self(request)
    }
}
