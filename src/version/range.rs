//! npm-style range normalization
//!
//! The `semver` crate speaks Cargo's requirement dialect. Remote entries carry
//! npm ranges, which differ in a few places:
//!
//! - alternatives are joined with `||`
//! - comparators within a set are separated by whitespace, not commas
//! - `1.2.3 - 2.0.0` is an inclusive hyphen range
//! - a bare `1.2.3` is an exact match (Cargo reads it as `^1.2.3`)
//! - a bare partial `1.2` means `1.2.x` (Cargo reads it as `^1.2`)
//!
//! [`normalize`] rewrites one npm range into a list of Cargo requirement
//! strings, one per alternative.

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '~', '^'];

/// Rewrite an npm range into one Cargo requirement string per alternative
pub fn normalize(range: &str) -> Vec<String> {
    range.split("||").map(normalize_set).collect()
}

fn normalize_set(set: &str) -> String {
    let set = set.trim();
    if is_any(set) {
        return "*".to_string();
    }

    if let Some((low, high)) = set.split_once(" - ") {
        return format!(
            ">={}, <={}",
            strip_v(low.trim()),
            strip_v(high.trim())
        );
    }

    join_operator_tokens(set)
        .iter()
        .map(|token| normalize_comparator(token))
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_any(set: &str) -> bool {
    matches!(set, "" | "*" | "x" | "X" | "latest")
}

/// Glue a dangling operator (`>= 1.2.3`) to the version that follows it
fn join_operator_tokens(set: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending = String::new();

    for token in set.split_whitespace() {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            pending.push_str(token);
            continue;
        }
        tokens.push(format!("{pending}{token}"));
        pending.clear();
    }

    if !pending.is_empty() {
        tokens.push(pending);
    }

    tokens
}

fn normalize_comparator(token: &str) -> String {
    let split = token
        .find(|c: char| !OPERATOR_CHARS.contains(&c))
        .unwrap_or(token.len());
    let (op, version) = token.split_at(split);
    let version = strip_v(version);

    if is_any(version) {
        return "*".to_string();
    }

    match op {
        "" => bare_version(version),
        _ => format!("{op}{version}"),
    }
}

/// A bare version is exact when complete and a wildcard when partial
fn bare_version(version: &str) -> String {
    let core = version.split(['-', '+']).next().unwrap_or(version);
    let parts: Vec<&str> = core.split('.').collect();

    if let Some(wild) = parts.iter().position(|p| is_any(p)) {
        let mut fixed: Vec<&str> = parts[..wild].to_vec();
        fixed.push("*");
        return fixed.join(".");
    }

    match parts.len() {
        1 | 2 => format!("{core}.*"),
        _ => format!("={version}"),
    }
}

/// Strip npm's tolerated `v`/`=` prefix from a version
pub fn strip_v(version: &str) -> &str {
    let version = version.trim();
    let version = version.strip_prefix('=').unwrap_or(version);
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}
