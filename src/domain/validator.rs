//! Option validation: turns [`DeepLinkOptions`] into an immutable
//! [`DeepLinkConfig`] or fails fast with a [`ConfigError`].

use core::fmt;
use std::sync::Arc;

use url::Url;

use crate::domain::authenticator::{Authenticator, LoginCallback};
use crate::domain::options::{CookieOptions, DeepLinkOptions, LoginOption, LoginTargets};
use crate::domain::request::RequestView;
use crate::error::ConfigError;
use crate::utils::paths::paths_match;

/// Cookie name used when the caller does not configure one.
pub const DEFAULT_COOKIE_NAME: &str = "returnUrl";

/// The login destination, resolved once at construction.
#[derive(Clone)]
pub enum LoginTarget {
    Local {
        path: String,
        /// Where authenticated users opening the login page go, if anywhere.
        home: Option<String>,
    },
    Remote {
        url: String,
    },
    Callback(Arc<dyn LoginCallback>),
}

impl LoginTarget {
    /// The local login path, when the login page is served by this app.
    pub fn local_path(&self) -> Option<&str> {
        match self {
            Self::Local { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns `true` when `path` is the local login page.
    pub fn is_login_path(&self, path: &str) -> bool {
        self.local_path()
            .is_some_and(|login_path| paths_match(path, login_path))
    }

    /// Where an unauthenticated request is redirected.
    pub fn destination(&self, request: &RequestView) -> String {
        match self {
            Self::Local { path, .. } => path.clone(),
            Self::Remote { url } => url.clone(),
            Self::Callback(callback) => callback.login_url(request),
        }
    }
}

impl fmt::Debug for LoginTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path, home } => f
                .debug_struct("Local")
                .field("path", path)
                .field("home", home)
                .finish(),
            Self::Remote { url } => f.debug_struct("Remote").field("url", url).finish(),
            Self::Callback(_) => f.write_str("Callback(<fn>)"),
        }
    }
}

/// Validated, immutable middleware configuration.
#[derive(Clone)]
pub struct DeepLinkConfig {
    authenticator: Arc<dyn Authenticator>,
    login: LoginTarget,
    cookie_name: String,
    cookie_options: CookieOptions,
    base_url: Option<String>,
    parsed_base_url: Option<Url>,
}

impl DeepLinkConfig {
    /// Validates `options`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    ///
    /// 1. `login` is present
    /// 2. a structured `login` sets exactly one of `local` / `remote`
    /// 3. `local.path` is present and starts with `/`
    /// 4. `remote.url` is present
    /// 5. `authenticated` is present
    /// 6. `base_url`, if set, is an absolute URL
    ///
    /// Validation has no side effects; the same options always validate to
    /// the same result.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] kind matching the first failed check.
    pub fn from_options(options: &DeepLinkOptions) -> Result<Self, ConfigError> {
        let login = resolve_login(options.login.as_ref())?;

        let authenticator = options
            .authenticated
            .clone()
            .ok_or(ConfigError::MissingAuthenticatedPredicate)?;

        let base_url = options
            .base_url
            .as_deref()
            .filter(|base| !base.is_empty())
            .map(str::to_string);

        let parsed_base_url = match base_url.as_deref() {
            Some(base) => Some(parse_base_url(base)?),
            None => None,
        };

        let cookie = options.cookie.as_ref();

        let cookie_name = cookie
            .and_then(|c| c.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COOKIE_NAME)
            .to_string();

        let cookie_options = cookie
            .and_then(|c| c.options.as_ref())
            .cloned()
            .unwrap_or_default()
            .overlay(&CookieOptions::return_url_defaults());

        Ok(Self {
            authenticator,
            login,
            cookie_name,
            cookie_options,
            base_url,
            parsed_base_url,
        })
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn login(&self) -> &LoginTarget {
        &self.login
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Caller options overlaid onto `{ http_only: true }`.
    pub fn cookie_options(&self) -> &CookieOptions {
        &self.cookie_options
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub(crate) fn parsed_base_url(&self) -> Option<&Url> {
        self.parsed_base_url.as_ref()
    }
}

impl fmt::Debug for DeepLinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLinkConfig")
            .field("login", &self.login)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_options", &self.cookie_options)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn resolve_login(login: Option<&LoginOption>) -> Result<LoginTarget, ConfigError> {
    match login {
        None => Err(ConfigError::MissingLogin),
        Some(LoginOption::Path(value)) if value.is_empty() => Err(ConfigError::MissingLogin),
        Some(LoginOption::Path(value)) if value.starts_with('/') => Ok(LoginTarget::Local {
            path: value.clone(),
            home: None,
        }),
        Some(LoginOption::Path(value)) => Ok(LoginTarget::Remote { url: value.clone() }),
        Some(LoginOption::Callback(callback)) => Ok(LoginTarget::Callback(callback.clone())),
        Some(LoginOption::Targets(targets)) => resolve_targets(targets),
    }
}

fn resolve_targets(targets: &LoginTargets) -> Result<LoginTarget, ConfigError> {
    match (&targets.local, &targets.remote) {
        (Some(_), Some(_)) => Err(ConfigError::AmbiguousLoginTarget),
        (None, None) => Err(ConfigError::MissingLoginTarget),
        (Some(local), None) => {
            let path = local
                .path
                .as_deref()
                .filter(|path| !path.is_empty())
                .ok_or(ConfigError::MissingLocalPath)?;

            if !path.starts_with('/') {
                return Err(ConfigError::InvalidLocalPath(path.to_string()));
            }

            let home = local
                .on_authenticated_at_login_path
                .as_ref()
                .and_then(|at_login| at_login.home.target())
                .map(str::to_string);

            Ok(LoginTarget::Local {
                path: path.to_string(),
                home,
            })
        }
        (None, Some(remote)) => {
            let url = remote
                .url
                .as_deref()
                .filter(|url| !url.is_empty())
                .ok_or(ConfigError::MissingRemoteUrl)?;

            Ok(LoginTarget::Remote {
                url: url.to_string(),
            })
        }
    }
}

/// Parses a base URL: it must be absolute and able to act as a base for
/// joining request paths (`mailto:` and the like cannot).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] otherwise.
pub fn parse_base_url(base: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(base).map_err(|_| ConfigError::InvalidBaseUrl(base.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(base.to_string()));
    }

    Ok(url)
}
