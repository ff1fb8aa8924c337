//! URL helpers for the catalog endpoints
//!
//! The JSON endpoints are served by the same origin that rendered the page,
//! under a configurable prefix.

/// Origin of the current page plus `prefix`, without a trailing slash
///
/// Returns just the trimmed prefix when no window is available, which keeps
/// relative requests working.
pub fn api_base(prefix: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    join_url(&origin, prefix)
}

/// Join a base and a path with exactly one slash between them
///
/// ```
/// use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://h/api/", "/ordenes/"), "http://h/api/ordenes/");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("/{}", path),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, path),
    }
}
