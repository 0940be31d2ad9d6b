//! Demo server configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. The deep link options themselves are built from it by
//! [`Config::deep_link_options`].
//!
//! ## Example
//!
//! ```bash
//! export LISTEN="127.0.0.1:3000"
//! export LOGIN="/login"
//! export LOGIN_HOME="true"
//! export BASE_URL="https://localhost:3000"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `LOGIN` - Login path (leading `/`) or remote login URL (default: `/login`)
//! - `LOGIN_HOME` - Where signed-in users opening the login page go:
//!   `true` for `/`, a path, or unset to show the page anyway
//! - `RETURN_URL_COOKIE` - Return URL cookie name (default: `returnUrl`)
//! - `COOKIE_SECURE` - Mark the return URL cookie `Secure` (default: `false`)
//! - `BASE_URL` - Base URL return URLs are resolved against and checked for
//! - `SESSION_COOKIE` - Cookie whose presence marks a signed-in user (default: `session`)

use anyhow::{Context, Result};
use std::env;

use crate::domain::authenticator::Authenticator;
use crate::domain::options::{
    CookieOptions, CookieSettings, DeepLinkOptions, Home, LocalLogin, LoginOption, RemoteLogin,
};
use crate::domain::validator::{DEFAULT_COOKIE_NAME, parse_base_url};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Local login path or remote login URL.
    pub login: String,
    /// Raw `LOGIN_HOME` value; see [`parse_home`].
    pub login_home: Option<String>,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub base_url: Option<String>,
    /// Demo authentication: a request is signed in when this cookie is set.
    pub session_cookie: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `COOKIE_SECURE` is not a boolean.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let login = env::var("LOGIN").unwrap_or_else(|_| "/login".to_string());
        let login_home = env::var("LOGIN_HOME").ok().filter(|v| !v.is_empty());

        let cookie_name =
            env::var("RETURN_URL_COOKIE").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string());

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(value) => parse_flag(&value)
                .with_context(|| format!("COOKIE_SECURE must be true or false, got '{value}'"))?,
            Err(_) => false,
        };

        let base_url = env::var("BASE_URL").ok().filter(|v| !v.is_empty());
        let session_cookie = env::var("SESSION_COOKIE").unwrap_or_else(|_| "session".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            login,
            login_home,
            cookie_name,
            cookie_secure,
            base_url,
            session_cookie,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` has no port
    /// - `login` or `session_cookie` is empty
    /// - `base_url` is not an absolute URL
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.login.is_empty() {
            anyhow::bail!("LOGIN must not be empty");
        }

        if self.session_cookie.is_empty() {
            anyhow::bail!("SESSION_COOKIE must not be empty");
        }

        if let Some(ref base_url) = self.base_url {
            parse_base_url(base_url)
                .with_context(|| format!("BASE_URL must be an absolute URL, got '{base_url}'"))?;
        }

        Ok(())
    }

    /// Builds the middleware options described by this configuration.
    pub fn deep_link_options(&self, authenticated: impl Authenticator + 'static) -> DeepLinkOptions {
        let login: LoginOption = if self.login.starts_with('/') {
            let home = self.login_home.as_deref().map_or(Home::Disabled, parse_home);
            LocalLogin::new(&self.login).with_home(home).into()
        } else {
            RemoteLogin::new(&self.login).into()
        };

        let cookie = CookieSettings::named(&self.cookie_name).with_options(CookieOptions {
            secure: self.cookie_secure.then_some(true),
            ..CookieOptions::default()
        });

        let options = DeepLinkOptions::new()
            .authenticated(authenticated)
            .login(login)
            .cookie(cookie);

        match self.base_url {
            Some(ref base_url) => options.base_url(base_url),
            None => options,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Login: {}", self.login);
        tracing::info!(
            "  Login home: {}",
            self.login_home.as_deref().unwrap_or("disabled")
        );
        tracing::info!("  Return URL cookie: {}", self.cookie_name);
        tracing::info!("  Base URL: {}", self.base_url.as_deref().unwrap_or("none"));
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Interprets `LOGIN_HOME`: `true` bounces to `/`, `false` disables the
/// bounce, anything else is used as the target path.
pub fn parse_home(value: &str) -> Home {
    match parse_flag(value) {
        Some(true) => Home::Root,
        Some(false) => Home::Disabled,
        None if value.is_empty() => Home::Disabled,
        None => Home::Path(value.to_string()),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}
