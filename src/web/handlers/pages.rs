//! Pages behind the login redirect.

use axum::response::{Html, IntoResponse};

const HOME_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Home</title></head>
  <body>
    <h1>Home</h1>
    <p>You are signed in.</p>
    <ul>
      <li><a href="/account">Account</a></li>
      <li><a href="/reports?year=2024">Reports</a></li>
    </ul>
    <form method="post" action="/logout"><button type="submit">Sign out</button></form>
  </body>
</html>
"#;

const ACCOUNT_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Account</title></head>
  <body>
    <h1>Account</h1>
    <p><a href="/">Home</a></p>
  </body>
</html>
"#;

const REPORTS_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Reports</title></head>
  <body>
    <h1>Reports</h1>
    <p><a href="/">Home</a></p>
  </body>
</html>
"#;

/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    Html(HOME_PAGE)
}

/// `GET /account`
pub async fn account_handler() -> impl IntoResponse {
    Html(ACCOUNT_PAGE)
}

/// `GET /reports`
///
/// Linked with a query string so the demo shows that the full original URL,
/// not just the path, survives the login detour.
pub async fn reports_handler() -> impl IntoResponse {
    Html(REPORTS_PAGE)
}
