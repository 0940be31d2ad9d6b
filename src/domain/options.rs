//! Caller-supplied middleware options, before validation.
//!
//! Every field is optional so that [`crate::domain::validator`] can report
//! exactly what is missing. All parts except the authenticator and the
//! login callback deserialize with serde, using the camelCase keys of the
//! original JSON option shape:
//!
//! ```json
//! {
//!   "login": { "local": { "path": "/login", "onAuthenticatedAtLoginPath": { "home": "/home" } } },
//!   "cookie": { "name": "returnUrl", "options": { "secure": true } }
//! }
//! ```

use core::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::authenticator::{Authenticator, LoginCallback};

/// Raw options handed to [`crate::DeepLinkService::new`].
#[derive(Clone, Default)]
pub struct DeepLinkOptions {
    /// Predicate deciding whether a request is authenticated. Required.
    pub authenticated: Option<Arc<dyn Authenticator>>,
    /// Where unauthenticated users are sent. Required.
    pub login: Option<LoginOption>,
    /// Name and attributes of the return URL cookie.
    pub cookie: Option<CookieSettings>,
    /// When set, return URLs are resolved against it on the way out and must
    /// start with it on the way back in.
    pub base_url: Option<String>,
}

impl DeepLinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(mut self, authenticated: impl Authenticator + 'static) -> Self {
        self.authenticated = Some(Arc::new(authenticated));
        self
    }

    pub fn login(mut self, login: impl Into<LoginOption>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn cookie(mut self, cookie: CookieSettings) -> Self {
        self.cookie = Some(cookie);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl fmt::Debug for DeepLinkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLinkOptions")
            .field(
                "authenticated",
                &self.authenticated.as_ref().map(|_| "<authenticator>"),
            )
            .field("login", &self.login)
            .field("cookie", &self.cookie)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The `login` option.
///
/// [`LoginOption::Targets`] is the primary shape. [`LoginOption::Path`] and
/// [`LoginOption::Callback`] are kept as aliases for the older plain-string
/// and function forms.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginOption {
    /// Legacy form: a leading `/` means a local path, anything else a remote
    /// URL.
    Path(String),
    /// `{ local: {...} }` or `{ remote: {...} }`.
    Targets(LoginTargets),
    /// Legacy form: the login destination is computed per request.
    #[serde(skip)]
    Callback(Arc<dyn LoginCallback>),
}

impl LoginOption {
    pub fn callback(callback: impl LoginCallback + 'static) -> Self {
        Self::Callback(Arc::new(callback))
    }
}

impl fmt::Debug for LoginOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Targets(targets) => f.debug_tuple("Targets").field(targets).finish(),
            Self::Callback(_) => f.write_str("Callback(<fn>)"),
        }
    }
}

impl From<&str> for LoginOption {
    fn from(value: &str) -> Self {
        Self::Path(value.to_string())
    }
}

impl From<String> for LoginOption {
    fn from(value: String) -> Self {
        Self::Path(value)
    }
}

impl From<LoginTargets> for LoginOption {
    fn from(value: LoginTargets) -> Self {
        Self::Targets(value)
    }
}

impl From<LocalLogin> for LoginOption {
    fn from(value: LocalLogin) -> Self {
        Self::Targets(LoginTargets {
            local: Some(value),
            remote: None,
        })
    }
}

impl From<RemoteLogin> for LoginOption {
    fn from(value: RemoteLogin) -> Self {
        Self::Targets(LoginTargets {
            local: None,
            remote: Some(value),
        })
    }
}

/// Structured login option. Exactly one of the two must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTargets {
    #[serde(default)]
    pub local: Option<LocalLogin>,
    #[serde(default)]
    pub remote: Option<RemoteLogin>,
}

/// A login page served by this application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalLogin {
    /// Must start with `/`.
    #[serde(default)]
    pub path: Option<String>,
    /// What to do with an already authenticated user who opens the login page.
    #[serde(default, alias = "authenticated")]
    pub on_authenticated_at_login_path: Option<AuthenticatedAtLogin>,
}

impl LocalLogin {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            on_authenticated_at_login_path: None,
        }
    }

    pub fn with_home(mut self, home: Home) -> Self {
        self.on_authenticated_at_login_path = Some(AuthenticatedAtLogin { home });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedAtLogin {
    #[serde(default)]
    pub home: Home,
}

/// Where an authenticated user landing on the login page is bounced to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<HomeValue>")]
pub enum Home {
    /// Serve the login page as usual.
    #[default]
    Disabled,
    /// Redirect to `/`.
    Root,
    /// Redirect to the given path.
    Path(String),
}

impl Home {
    /// The redirect target, if any. An empty path counts as disabled.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Path(path) if path.is_empty() => None,
            Self::Root => Some("/"),
            Self::Path(path) => Some(path),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HomeValue {
    Flag(bool),
    Path(String),
}

impl From<Option<HomeValue>> for Home {
    fn from(value: Option<HomeValue>) -> Self {
        match value {
            None | Some(HomeValue::Flag(false)) => Self::Disabled,
            Some(HomeValue::Flag(true)) => Self::Root,
            Some(HomeValue::Path(path)) if path.is_empty() => Self::Disabled,
            Some(HomeValue::Path(path)) => Self::Path(path),
        }
    }
}

/// A login destination hosted elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteLogin {
    #[serde(default)]
    pub url: Option<String>,
}

impl RemoteLogin {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// The `cookie` option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CookieSettings {
    /// Defaults to `returnUrl`.
    #[serde(default)]
    pub name: Option<String>,
    /// Overlaid onto the default `{ httpOnly: true }`.
    #[serde(default)]
    pub options: Option<CookieOptions>,
}

impl CookieSettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            options: None,
        }
    }

    pub fn with_options(mut self, options: CookieOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Attributes applied to the return URL cookie by the HTTP adapter.
///
/// The engine only merges these with the defaults and hands them through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    #[serde(default)]
    pub http_only: Option<bool>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub same_site: Option<SameSitePolicy>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Lifetime in seconds. Unset means a session cookie.
    #[serde(default)]
    pub max_age: Option<i64>,
}

impl CookieOptions {
    /// The attributes every return URL cookie starts from.
    pub fn return_url_defaults() -> Self {
        Self {
            http_only: Some(true),
            ..Self::default()
        }
    }

    /// Fills every unset attribute from `defaults`; attributes set here win.
    pub fn overlay(&self, defaults: &CookieOptions) -> CookieOptions {
        CookieOptions {
            http_only: self.http_only.or(defaults.http_only),
            secure: self.secure.or(defaults.secure),
            same_site: self.same_site.or(defaults.same_site),
            path: self.path.clone().or_else(|| defaults.path.clone()),
            domain: self.domain.clone().or_else(|| defaults.domain.clone()),
            max_age: self.max_age.or(defaults.max_age),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    #[serde(alias = "Strict")]
    Strict,
    #[serde(alias = "Lax")]
    Lax,
    #[serde(alias = "None")]
    None,
}
