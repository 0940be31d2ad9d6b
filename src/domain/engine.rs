//! The redirect decision engine.
//!
//! Given a validated [`DeepLinkConfig`] and a [`RequestView`], decides
//! whether the request passes through, is bounced to the login destination,
//! or is sent back to the URL saved before login. Side effects (cookies,
//! redirects) are left to the caller executing the returned [`Decision`].

use crate::domain::decision::Decision;
use crate::domain::request::RequestView;
use crate::domain::validator::{DeepLinkConfig, LoginTarget};
use crate::error::AppError;
use crate::utils::paths::{is_favicon, paths_match};
use crate::utils::return_url::{
    decode_return_url, encode_return_url, is_relative_to_base, resolve_against_base,
};

/// Decides how to handle one request.
///
/// # Flow
///
/// 1. Non-`GET` requests and the favicon probe pass through untouched; the
///    authenticator is not consulted for them
/// 2. The authenticator is awaited once
/// 3. Authenticated: a saved return URL wins, then the optional home bounce
///    away from the login page, otherwise pass through
/// 4. Unauthenticated: the local login page itself passes through, anything
///    else is remembered in the return cookie and redirected to login
///
/// # Errors
///
/// Returns [`AppError::ReturnUrlNotRelativeToBaseUrl`] when a base URL is
/// configured and the decoded return URL cookie does not start with it.
pub async fn decide(config: &DeepLinkConfig, request: &RequestView) -> Result<Decision, AppError> {
    if !request.is_get() || is_favicon(&request.path) {
        tracing::trace!(
            method = %request.method,
            path = %request.path,
            "Not a navigational request, passing through"
        );
        return Ok(Decision::PassThrough);
    }

    if config.authenticator().is_authenticated(request).await {
        decide_authenticated(config, request)
    } else {
        Ok(decide_unauthenticated(config, request))
    }
}

fn decide_authenticated(
    config: &DeepLinkConfig,
    request: &RequestView,
) -> Result<Decision, AppError> {
    let cookie_name = config.cookie_name();

    if let Some(raw) = request.cookie(cookie_name).filter(|value| !value.is_empty()) {
        let return_url = decode_return_url(raw);

        if let Some(base_url) = config.base_url()
            && !is_relative_to_base(&return_url, base_url)
        {
            return Err(AppError::return_url_not_relative(return_url, base_url));
        }

        tracing::debug!(
            path = %request.path,
            cookie_name,
            target = %return_url,
            "Authenticated with saved return URL, redirecting back"
        );

        return Ok(Decision::RedirectAndClearCookie {
            cookie_name: cookie_name.to_string(),
            target: return_url,
        });
    }

    if let LoginTarget::Local {
        path,
        home: Some(home),
    } = config.login()
        && paths_match(&request.path, path)
    {
        tracing::debug!(
            path = %request.path,
            target = %home,
            "Authenticated user on login page, redirecting home"
        );

        return Ok(Decision::Redirect {
            target: home.clone(),
        });
    }

    Ok(Decision::PassThrough)
}

fn decide_unauthenticated(config: &DeepLinkConfig, request: &RequestView) -> Decision {
    if config.login().is_login_path(&request.path) {
        tracing::trace!(path = %request.path, "Login page requested, passing through");
        return Decision::PassThrough;
    }

    let return_url = match config.parsed_base_url() {
        Some(base) => resolve_against_base(base, &request.original_url),
        None => request.original_url.clone(),
    };

    let target = config.login().destination(request);

    tracing::debug!(
        path = %request.path,
        cookie_name = config.cookie_name(),
        return_url = %return_url,
        target = %target,
        "Unauthenticated request, redirecting to login"
    );

    Decision::SetCookieAndRedirect {
        cookie_name: config.cookie_name().to_string(),
        cookie_value: encode_return_url(&return_url),
        cookie_options: config.cookie_options().clone(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authenticator::MockAuthenticator;
    use crate::domain::options::{
        CookieOptions, CookieSettings, DeepLinkOptions, Home, LocalLogin, LoginOption,
        RemoteLogin,
    };

    const BASE_URL: &str = "https://localhost:3000";

    fn authenticator(authenticated: bool) -> MockAuthenticator {
        let mut mock = MockAuthenticator::new();
        mock.expect_is_authenticated()
            .times(1)
            .returning(move |_| authenticated);
        mock
    }

    fn config(authenticator: MockAuthenticator, login: impl Into<LoginOption>) -> DeepLinkConfig {
        config_with(DeepLinkOptions::new().authenticated(authenticator).login(login))
    }

    fn config_with(options: DeepLinkOptions) -> DeepLinkConfig {
        DeepLinkConfig::from_options(&options).unwrap()
    }

    fn local_login() -> LocalLogin {
        LocalLogin::new("/login")
    }

    // ── Method / favicon filtering ──────────────────────────────────────────

    #[tokio::test]
    async fn test_non_get_passes_through_without_authenticating() {
        for authenticated in [true, false] {
            let mut mock = MockAuthenticator::new();
            mock.expect_is_authenticated()
                .never()
                .returning(move |_| authenticated);
            let config = config(mock, local_login());

            for method in ["POST", "put", "DELETE", "patch", "HEAD", "OPTIONS"] {
                let req = RequestView::new(method, "/account", "/account");
                let decision = decide(&config, &req).await.unwrap();
                assert_eq!(decision, Decision::PassThrough, "method {method}");
            }
        }
    }

    #[tokio::test]
    async fn test_favicon_passes_through() {
        let mut mock = MockAuthenticator::new();
        mock.expect_is_authenticated().never().returning(|_| false);
        let config = config(mock, local_login());

        for path in ["/favicon.ico", "/favicon.ico/", "/FAVICON.ICO", "/Favicon.Ico/"] {
            let decision = decide(&config, &RequestView::get(path)).await.unwrap();
            assert_eq!(decision, Decision::PassThrough, "path {path}");
        }
    }

    #[tokio::test]
    async fn test_lowercase_get_is_navigational() {
        let config = config(authenticator(false), local_login());
        let req = RequestView::new("get", "/account", "/account");

        let decision = decide(&config, &req).await.unwrap();

        assert!(!decision.is_pass_through());
    }

    // ── Authenticated ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_authenticated_without_cookie_passes_through() {
        let config = config(authenticator(true), local_login());

        let decision = decide(&config, &RequestView::get("/account")).await.unwrap();

        assert_eq!(decision, Decision::PassThrough);
    }

    #[tokio::test]
    async fn test_authenticated_return_url_without_base_url_is_not_checked() {
        let config = config(authenticator(true), local_login());
        let req = RequestView::get("/account")
            .with_cookie("returnUrl", encode_return_url("http://evil.example/x"));

        let decision = decide(&config, &req).await.unwrap();

        assert_eq!(
            decision,
            Decision::RedirectAndClearCookie {
                cookie_name: "returnUrl".to_string(),
                target: "http://evil.example/x".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_authenticated_return_url_within_base_url() {
        let config = config_with(
            DeepLinkOptions::new()
                .authenticated(authenticator(true))
                .login(local_login())
                .base_url(BASE_URL),
        );
        let base = url::Url::parse(BASE_URL).unwrap();
        let return_url = resolve_against_base(&base, "a/b");
        let req = RequestView::get("/").with_cookie("returnUrl", encode_return_url(&return_url));

        let decision = decide(&config, &req).await.unwrap();

        assert_eq!(
            decision,
            Decision::RedirectAndClearCookie {
                cookie_name: "returnUrl".to_string(),
                target: "https://localhost:3000/a/b".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_authenticated_return_url_outside_base_url_is_rejected() {
        let config = config_with(
            DeepLinkOptions::new()
                .authenticated(authenticator(true))
                .login(local_login())
                .base_url(BASE_URL),
        );
        let req = RequestView::get("/")
            .with_cookie("returnUrl", encode_return_url("http://evil.example/x"));

        let err = decide(&config, &req).await.unwrap_err();

        assert_eq!(
            err,
            AppError::ReturnUrlNotRelativeToBaseUrl {
                return_url: "http://evil.example/x".to_string(),
                base_url: BASE_URL.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_authenticated_reads_configured_cookie_name() {
        let config = config_with(
            DeepLinkOptions::new()
                .authenticated(authenticator(true))
                .login(local_login())
                .cookie(CookieSettings::named("back")),
        );
        let req = RequestView::get("/")
            .with_cookie("returnUrl", encode_return_url("/ignored"))
            .with_cookie("back", encode_return_url("/reports?year=2024"));

        let decision = decide(&config, &req).await.unwrap();

        assert_eq!(
            decision,
            Decision::RedirectAndClearCookie {
                cookie_name: "back".to_string(),
                target: "/reports?year=2024".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_authenticated_empty_cookie_counts_as_absent() {
        let config = config(authenticator(true), local_login());
        let req = RequestView::get("/account").with_cookie("returnUrl", "");

        let decision = decide(&config, &req).await.unwrap();

        assert_eq!(decision, Decision::PassThrough);
    }

    #[tokio::test]
    async fn test_authenticated_at_login_with_home_path() {
        let login = local_login().with_home(Home::Path("/my/home/route".to_string()));
        let config = config(authenticator(true), login);

        let decision = decide(&config, &RequestView::get("/login")).await.unwrap();

        assert_eq!(
            decision,
            Decision::Redirect {
                target: "/my/home/route".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_authenticated_at_login_with_home_flag() {
        let config = config(authenticator(true), local_login().with_home(Home::Root));

        let decision = decide(&config, &RequestView::get("/LOGIN/")).await.unwrap();

        assert_eq!(
            decision,
            Decision::Redirect {
                target: "/".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_authenticated_at_login_without_home() {
        let config = config(authenticator(true), local_login().with_home(Home::Disabled));

        let decision = decide(&config, &RequestView::get("/login")).await.unwrap();

        assert_eq!(decision, Decision::PassThrough);
    }

    #[tokio::test]
    async fn test_authenticated_at_login_with_empty_home_path() {
        let config = config(
            authenticator(true),
            local_login().with_home(Home::Path(String::new())),
        );

        let decision = decide(&config, &RequestView::get("/login")).await.unwrap();

        assert_eq!(decision, Decision::PassThrough);
    }

    #[tokio::test]
    async fn test_authenticated_home_only_applies_on_login_path() {
        let config = config(authenticator(true), local_login().with_home(Home::Root));

        let decision = decide(&config, &RequestView::get("/account")).await.unwrap();

        assert_eq!(decision, Decision::PassThrough);
    }

    #[tokio::test]
    async fn test_authenticated_return_url_wins_over_home() {
        let config = config(authenticator(true), local_login().with_home(Home::Root));
        let req = RequestView::get("/login").with_cookie("returnUrl", encode_return_url("/deep"));

        let decision = decide(&config, &req).await.unwrap();

        assert_eq!(decision.target(), Some("/deep"));
        assert!(matches!(decision, Decision::RedirectAndClearCookie { .. }));
    }

    // ── Unauthenticated ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unauthenticated_login_page_passes_through() {
        let mut mock = MockAuthenticator::new();
        mock.expect_is_authenticated().times(4).returning(|_| false);
        let config = config(mock, local_login());

        for path in ["/login", "/login/", "/Login", "/LOGIN"] {
            let decision = decide(&config, &RequestView::get(path)).await.unwrap();
            assert_eq!(decision, Decision::PassThrough, "path {path}");
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_local_login() {
        let config = config(authenticator(false), local_login());
        let req = RequestView::get("/account").with_original_url("/account?tab=billing");

        let decision = decide(&config, &req).await.unwrap();

        assert_eq!(
            decision,
            Decision::SetCookieAndRedirect {
                cookie_name: "returnUrl".to_string(),
                cookie_value: encode_return_url("/account?tab=billing"),
                cookie_options: CookieOptions::return_url_defaults(),
                target: "/login".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_remote_login() {
        let config = config(
            authenticator(false),
            RemoteLogin::new("https://www.hotwire.com"),
        );

        let decision = decide(&config, &RequestView::get("/login")).await.unwrap();

        assert_eq!(decision.target(), Some("https://www.hotwire.com"));
        assert!(matches!(decision, Decision::SetCookieAndRedirect { .. }));
    }

    #[tokio::test]
    async fn test_unauthenticated_resolves_against_base_url() {
        let config = config_with(
            DeepLinkOptions::new()
                .authenticated(authenticator(false))
                .login(local_login())
                .base_url(BASE_URL),
        );
        let req = RequestView::get("/a/b").with_original_url("/a/b?c=d");

        let decision = decide(&config, &req).await.unwrap();

        let Decision::SetCookieAndRedirect { cookie_value, .. } = decision else {
            panic!("expected login redirect, got {decision:?}");
        };
        assert_eq!(
            decode_return_url(&cookie_value),
            "https://localhost:3000/a/b?c=d"
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_uses_configured_cookie() {
        let options = CookieOptions {
            http_only: Some(false),
            secure: Some(true),
            ..CookieOptions::default()
        };
        let config = config_with(
            DeepLinkOptions::new()
                .authenticated(authenticator(false))
                .login(local_login())
                .cookie(CookieSettings::named("back").with_options(options)),
        );

        let decision = decide(&config, &RequestView::get("/account")).await.unwrap();

        let Decision::SetCookieAndRedirect {
            cookie_name,
            cookie_options,
            ..
        } = decision
        else {
            panic!("expected login redirect, got {decision:?}");
        };
        assert_eq!(cookie_name, "back");
        assert_eq!(cookie_options.http_only, Some(false));
        assert_eq!(cookie_options.secure, Some(true));
    }

    #[tokio::test]
    async fn test_unauthenticated_legacy_callback_login() {
        let login = LoginOption::callback(|req: &RequestView| {
            format!("https://sso.example.com/authorize?from={}", req.path)
        });
        let config = config(authenticator(false), login);

        let decision = decide(&config, &RequestView::get("/reports")).await.unwrap();

        assert_eq!(
            decision.target(),
            Some("https://sso.example.com/authorize?from=/reports")
        );
    }

    #[tokio::test]
    async fn test_return_url_survives_the_round_trip() {
        let original = "/search?q=caf%C3%A9&tags=a,b;c#results";

        let login_config = config(authenticator(false), local_login());
        let req = RequestView::get("/search").with_original_url(original);
        let Decision::SetCookieAndRedirect { cookie_value, .. } =
            decide(&login_config, &req).await.unwrap()
        else {
            panic!("expected login redirect");
        };

        let back_config = config(authenticator(true), local_login());
        let req = RequestView::get("/").with_cookie("returnUrl", cookie_value);
        let decision = decide(&back_config, &req).await.unwrap();

        assert_eq!(decision.target(), Some(original));
    }
}
