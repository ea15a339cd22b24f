//! Version oracle
//!
//! Resolution never parses versions itself. It asks a [`VersionOracle`] four
//! questions: is this a valid version, does it satisfy a range, how do two
//! versions order, and what is the lowest version a range admits.
//! [`SemverOracle`] answers them with the `semver` crate, after rewriting npm
//! ranges into Cargo's dialect (see [`range`]).

pub mod range;

use std::cmp::Ordering;

use semver::{Comparator, Op, Prerelease, Version, VersionReq};

/// Semantic-version queries consumed by ingestion and resolution
pub trait VersionOracle {
    /// Whether `version` is a valid semantic version
    fn is_valid_semver(&self, version: &str) -> bool;

    /// Whether `version` satisfies `range`
    fn is_compatible(&self, version: &str, range: &str) -> bool;

    /// Order two versions by semver precedence
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Lowest version satisfying `range`, if any
    fn smallest_version(&self, range: &str) -> Option<String>;
}

/// Version oracle backed by the `semver` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverOracle;

impl SemverOracle {
    pub fn new() -> Self {
        Self
    }

    fn parse_version(version: &str) -> Option<Version> {
        Version::parse(range::strip_v(version)).ok()
    }

    fn parse_range(range: &str) -> Option<Vec<VersionReq>> {
        range::normalize(range)
            .iter()
            .map(|req| VersionReq::parse(req).ok())
            .collect()
    }
}

impl VersionOracle for SemverOracle {
    fn is_valid_semver(&self, version: &str) -> bool {
        Self::parse_version(version).is_some()
    }

    fn is_compatible(&self, version: &str, range: &str) -> bool {
        let Some(version) = Self::parse_version(version) else {
            return false;
        };
        Self::parse_range(range).is_some_and(|reqs| reqs.iter().any(|req| req.matches(&version)))
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (Self::parse_version(a), Self::parse_version(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a.cmp(b),
        }
    }

    fn smallest_version(&self, range: &str) -> Option<String> {
        Self::parse_range(range)?
            .iter()
            .filter_map(lowest_match)
            .min()
            .map(|v| v.to_string())
    }
}

/// Lowest version admitted by one comparator set
fn lowest_match(req: &VersionReq) -> Option<Version> {
    let bounds = req
        .comparators
        .iter()
        .map(lower_bound)
        .collect::<Option<Vec<_>>>()?;
    let candidate = bounds
        .into_iter()
        .max()
        .unwrap_or_else(|| Version::new(0, 0, 0));

    req.matches(&candidate).then_some(candidate)
}

/// `None` when the bound lies past the largest representable version
fn lower_bound(comparator: &Comparator) -> Option<Version> {
    let major = comparator.major;
    let minor = comparator.minor.unwrap_or(0);
    let patch = comparator.patch.unwrap_or(0);

    let version = match comparator.op {
        Op::Less | Op::LessEq => Version::new(0, 0, 0),
        Op::Greater => match (comparator.minor, comparator.patch) {
            (Some(_), Some(_)) if !comparator.pre.is_empty() => Version::new(major, minor, patch),
            (Some(_), Some(_)) => Version::new(major, minor, patch.checked_add(1)?),
            (Some(_), None) => Version::new(major, minor.checked_add(1)?, 0),
            (None, _) => Version::new(major.checked_add(1)?, 0, 0),
        },
        _ => {
            let mut version = Version::new(major, minor, patch);
            if comparator.patch.is_some() {
                version.pre = comparator.pre.clone();
            } else {
                version.pre = Prerelease::EMPTY;
            }
            version
        }
    };
    Some(version)
}
