//! Return URL encoding, base resolution and the base-URL prefix check.
//!
//! The return URL travels in a client-held cookie, so it is percent-encoded
//! on the way out and decoded on the way back in.

use url::Url;

/// Percent-encodes a return URL for storage in a cookie value.
///
/// Every byte other than ASCII alphanumerics and `-_.~` is escaped, so the
/// value never contains `;`, `,` or whitespace.
pub fn encode_return_url(return_url: &str) -> String {
    urlencoding::encode(return_url).into_owned()
}

/// Decodes a cookie value produced by [`encode_return_url`].
///
/// Malformed escapes are kept verbatim and invalid UTF-8 is replaced, so
/// decoding never fails; a mangled value is caught by the base-URL check or
/// simply redirects somewhere harmless on the same site.
pub fn decode_return_url(cookie_value: &str) -> String {
    let bytes = urlencoding::decode_binary(cookie_value.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Resolves a request's original URL against a base URL.
///
/// Behaves like a browser resolving a link: an absolute path replaces the
/// base path, a relative one is joined to the base's last directory. If the
/// original URL cannot be joined it is returned as-is.
///
/// # Examples
///
/// ```
/// use deep_link::utils::return_url::resolve_against_base;
/// use url::Url;
///
/// let base = Url::parse("https://localhost:3000").unwrap();
/// assert_eq!(
///     resolve_against_base(&base, "/a/b?c=d"),
///     "https://localhost:3000/a/b?c=d"
/// );
/// ```
pub fn resolve_against_base(base: &Url, original_url: &str) -> String {
    match base.join(original_url) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!(
                original_url,
                base = %base,
                error = %e,
                "Could not resolve original URL against base, keeping it verbatim"
            );
            original_url.to_string()
        }
    }
}

/// Plain string-prefix check of a decoded return URL against the configured
/// base URL.
pub fn is_relative_to_base(return_url: &str, base_url: &str) -> bool {
    return_url.starts_with(base_url)
}
