//! Request path normalization.

use percent_encoding::percent_decode_str;

/// Turn a request path into an operation name.
///
/// Percent-escapes are decoded first, then every leading `/` is removed, so
/// `/add`, `//add`, `/%61dd` and `%2Fadd` all name `add`. Nothing else is
/// rewritten: case, trailing characters and inner separators are kept.
///
/// Returns `None` when the decoded path is not valid UTF-8; such a path can
/// never name an operation.
///
/// `raw` is the path component only. The router passes `uri.path()`, so a
/// query string is never part of the name and `/add?x=1` still runs `add`.
///
/// ```
/// use calcrpc::normalize_path;
///
/// assert_eq!(normalize_path("/add").as_deref(), Some("add"));
/// assert_eq!(normalize_path("/ADD").as_deref(), Some("ADD"));
/// assert_eq!(normalize_path("/").as_deref(), Some(""));
/// ```
pub fn normalize_path(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    Some(decoded.trim_start_matches('/').to_owned())
}
