//! URL and specifier utilities
//!
//! Remote files are addressed relative to the remote's scope URL, the
//! directory its remote entry was served from. These helpers are plain string
//! transforms so they work for absolute URLs, root-relative paths and
//! relative paths alike.

/// Join a base and a relative path with exactly one `/` between them.
///
/// Leading `./` and `/` on the path are dropped; an absolute path (one with a
/// scheme) is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(join("http://my.service/mfe1/", "./dep-a.js"), "http://my.service/mfe1/dep-a.js");
/// assert_eq!(join("team/mfe1", "./wc-comp-a"), "team/mfe1/wc-comp-a");
/// ```
pub fn join(base: &str, path: &str) -> String {
    if path.contains("://") {
        return path.to_string();
    }

    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    let path = path.trim_start_matches('/');
    let base = base.trim_end_matches('/');

    match (base.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{path}"),
    }
}

/// Directory of a remote entry URL, with a trailing slash.
///
/// Query strings and fragments are dropped before taking the directory.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(scope_url_of("http://my.service/mfe1/remoteEntry.json"), "http://my.service/mfe1/");
/// assert_eq!(scope_url_of("remoteEntry.json"), "./");
/// ```
pub fn scope_url_of(url: &str) -> String {
    let url = url.split(['?', '#']).next().unwrap_or(url);

    let authority_end = url.find("://").map_or(0, |i| i + 3);
    match url[authority_end..].rfind('/') {
        Some(i) => url[..=authority_end + i].to_string(),
        None if authority_end > 0 => format!("{url}/"),
        None => "./".to_string(),
    }
}

/// Base name of a file path with `.js`, `.mjs` or `.cjs` stripped
pub fn file_stem(file: &str) -> &str {
    let name = file.rsplit('/').next().unwrap_or(file);
    [".mjs", ".cjs", ".js"]
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}
