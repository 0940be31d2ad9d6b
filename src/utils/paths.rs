//! Request path normalization used for login and favicon comparisons.

/// Normalized form of the path browsers probe for automatically.
pub const FAVICON_PATH: &str = "/favicon.ico/";

/// Normalizes a path for comparison.
///
/// Lower-cases the path and makes sure it ends with exactly the one trailing
/// slash it already had, or a single added one. `/Login`, `/login/` and
/// `/LOGIN` all normalize to `/login/`.
///
/// # Examples
///
/// ```
/// use deep_link::utils::paths::normalize_path;
///
/// assert_eq!(normalize_path("/Login"), "/login/");
/// assert_eq!(normalize_path("/login/"), "/login/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.to_lowercase();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Compares two paths under [`normalize_path`].
pub fn paths_match(left: &str, right: &str) -> bool {
    normalize_path(left) == normalize_path(right)
}

/// Returns `true` for the browser's favicon probe, in any case, with or
/// without a trailing slash.
pub fn is_favicon(path: &str) -> bool {
    normalize_path(path) == FAVICON_PATH
}
