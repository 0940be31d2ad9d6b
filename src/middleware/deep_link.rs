//! Axum middleware executing deep link decisions.

use axum::{
    extract::{OriginalUri, Request, State},
    http::{StatusCode, header::LOCATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;

use crate::application::services::DeepLinkService;
use crate::domain::decision::Decision;
use crate::domain::options::{CookieOptions, SameSitePolicy};
use crate::domain::request::RequestView;
use crate::error::AppError;

/// Path applied to the return URL cookie when the options do not set one,
/// so the cookie set on a deep page is visible again on the login page.
const DEFAULT_COOKIE_PATH: &str = "/";

/// Sends anonymous navigations to login and brings users back afterwards.
///
/// # Flow
///
/// 1. Build a [`RequestView`] from the method, path, original URL and cookies
/// 2. Ask [`DeepLinkService::decide`] what to do
/// 3. Execute the decision:
///    - `PassThrough` - continue to the next handler
///    - `Redirect` - `302 Found` to the home page
///    - `RedirectAndClearCookie` - remove the return cookie, `302` back
///    - `SetCookieAndRedirect` - store the return cookie, `302` to login
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use deep_link::middleware::deep_link;
///
/// let app = Router::new()
///     .route("/account", get(account_handler))
///     .route("/login", get(login_page))
///     .layer(middleware::from_fn_with_state(service.clone(), deep_link::layer));
/// ```
///
/// # Errors
///
/// Returns [`AppError::ReturnUrlNotRelativeToBaseUrl`] (`400 Bad Request`)
/// when the return cookie points outside the configured base URL.
pub async fn layer(
    State(deep_link): State<DeepLinkService>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let view = request_view(&req, &jar);

    let decision = deep_link.decide(&view).await.inspect_err(|e| {
        tracing::warn!(path = %view.path, error = %e, "Rejecting return URL cookie");
    })?;

    let response = match decision {
        Decision::PassThrough => next.run(req).await,
        Decision::Redirect { target } => found(target).into_response(),
        Decision::RedirectAndClearCookie {
            cookie_name,
            target,
        } => {
            tracing::info!(return_url = %target, "Redirecting back to return URL");
            let removal = removal_cookie(cookie_name, deep_link.config().cookie_options());
            let jar = jar.remove(removal);
            (jar, found(target)).into_response()
        }
        Decision::SetCookieAndRedirect {
            cookie_name,
            cookie_value,
            cookie_options,
            target,
        } => {
            tracing::info!(
                path = %view.path,
                login = %target,
                "No valid authentication, setting return URL cookie and redirecting to login"
            );
            let jar = jar.add(return_url_cookie(cookie_name, cookie_value, &cookie_options));
            (jar, found(target)).into_response()
        }
    };

    Ok(response)
}

/// `302 Found`, the status browsers follow with a plain `GET`.
fn found(target: String) -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, target)])
}

fn request_view(req: &Request, jar: &CookieJar) -> RequestView {
    // Nested routers strip their prefix from `req.uri()`; login paths are
    // configured against the full path.
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map_or(req.uri(), |OriginalUri(uri)| uri);

    let original_url = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    RequestView {
        method: req.method().as_str().to_string(),
        path: uri.path().to_string(),
        original_url,
        cookies: jar
            .iter()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect(),
    }
}

fn cookie_path(options: &CookieOptions) -> String {
    options
        .path
        .clone()
        .unwrap_or_else(|| DEFAULT_COOKIE_PATH.to_string())
}

/// Removal cookie for the return URL. Browsers only drop a cookie whose
/// path and domain match the ones it was set with.
fn removal_cookie(name: String, options: &CookieOptions) -> Cookie<'static> {
    let mut builder = Cookie::build((name, "")).path(cookie_path(options));

    if let Some(domain) = options.domain.clone() {
        builder = builder.domain(domain);
    }

    builder.build()
}

fn return_url_cookie(name: String, value: String, options: &CookieOptions) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value)).path(cookie_path(options));

    if let Some(http_only) = options.http_only {
        builder = builder.http_only(http_only);
    }
    if let Some(secure) = options.secure {
        builder = builder.secure(secure);
    }
    if let Some(same_site) = options.same_site {
        builder = builder.same_site(match same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        });
    }
    if let Some(domain) = options.domain.clone() {
        builder = builder.domain(domain);
    }
    if let Some(max_age) = options.max_age {
        builder = builder.max_age(Duration::seconds(max_age));
    }

    builder.build()
}
