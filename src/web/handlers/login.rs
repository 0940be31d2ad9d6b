//! Login page and demo sign-in/sign-out handlers.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::state::AppState;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Sign in</title></head>
  <body>
    <h1>Sign in</h1>
    <form method="post" action="/login">
      <label>Name <input name="username" autofocus></label>
      <button type="submit">Sign in</button>
    </form>
  </body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
///
/// Reachable without a session: the deep link middleware lets the local
/// login path through for anonymous users.
pub async fn login_page_handler() -> impl IntoResponse {
    Html(LOGIN_PAGE)
}

/// Signs the user in by setting the session cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// Redirects to `/` with `303 See Other`. That follow-up `GET` is where the
/// deep link middleware finds the return URL cookie and sends the user back
/// to the page they originally asked for.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let username = form.username.trim();

    if username.is_empty() {
        return (jar, Redirect::to("/login"));
    }

    tracing::info!(username, "Signed in");

    let session = Cookie::build((state.session_cookie.to_string(), username.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    (jar.add(session), Redirect::to("/"))
}

/// Signs the user out.
///
/// # Endpoint
///
/// `POST /logout`
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build((state.session_cookie.to_string(), "")).path("/"));
    (jar, Redirect::to("/login"))
}
