//! Merging a singleton declaration into a scope's shared external
//!
//! ## Algorithm
//!
//! 1. Drop any earlier ref of the same remote (a remote declares one version per scope)
//! 2. Same tag already present: append the ref (host refs go first and set the host bit)
//! 3. Otherwise push a new version (`share` in the strict scope, `skip` elsewhere)
//! 4. Re-sort versions descending and mark the external dirty (except in the strict scope)

use crate::domain::{
    Action, RemoteEntry, RemoteRef, ScopeType, SharedExternal, SharedInfo, SharedVersion,
};
use crate::error::{FederationError, Result};
use crate::registry::Registry;

use super::{ResolveContext, enforce};

/// Merge one singleton declaration of `entry` into its scope
pub fn merge_shared(
    ctx: ResolveContext<'_>,
    registry: &mut Registry,
    entry: &RemoteEntry,
    shared: &SharedInfo,
    tag: &str,
) -> Result<()> {
    let scope = shared.share_scope.as_deref();
    let scope_type = registry.scope_type(scope);
    let mut external = registry
        .shared_external(&shared.package_name, scope)
        .cloned()
        .unwrap_or_default();

    let incoming = RemoteRef {
        name: entry.name.clone(),
        file: shared.out_file_name.clone(),
        required_version: shared.required_version.clone(),
        strict_version: shared.strict_version,
        cached: false,
        bundle: shared.bundle.clone(),
    };

    external.remove_remote(&entry.name);

    match external.versions.iter_mut().find(|v| v.tag == tag) {
        Some(version) => {
            check_range_conflict(ctx, version, &incoming, &shared.package_name)?;
            if entry.host {
                version.host = true;
                version.remotes.insert(0, incoming);
            } else {
                version.remotes.push(incoming);
            }
        }
        None => {
            let action = match scope_type {
                ScopeType::Strict => Action::Share,
                _ => Action::Skip,
            };
            external
                .versions
                .push(SharedVersion::new(tag, entry.host, action, incoming));
        }
    }

    sort_versions(ctx, &mut external);
    if scope_type != ScopeType::Strict {
        external.dirty = true;
    }

    registry.add_or_update_shared(&shared.package_name, external, scope);
    Ok(())
}

/// Sort versions descending by semver precedence (stable for equal tags)
pub fn sort_versions(ctx: ResolveContext<'_>, external: &mut SharedExternal) {
    external
        .versions
        .sort_by(|a, b| ctx.oracle.compare(&b.tag, &a.tag));
}

fn check_range_conflict(
    ctx: ResolveContext<'_>,
    version: &SharedVersion,
    incoming: &RemoteRef,
    package: &str,
) -> Result<()> {
    if !incoming.strict_version {
        return Ok(());
    }
    let Some(first) = version.first_ref() else {
        return Ok(());
    };
    if first.required_version == incoming.required_version {
        return Ok(());
    }

    enforce(
        ctx.config.strict.external_compatibility,
        FederationError::VersionRangeConflict {
            remote: incoming.name.clone(),
            package: package.to_string(),
            tag: version.tag.clone(),
            required: incoming.required_version.clone(),
            cached_required: first.required_version.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StrictFlags};
    use crate::domain::STRICT_SCOPE;
    use crate::test_fixtures::{remote_entry, shared_info};
    use crate::version::SemverOracle;

    fn merge(
        config: &Config,
        registry: &mut Registry,
        entry: &RemoteEntry,
        shared: &SharedInfo,
    ) -> Result<()> {
        let oracle = SemverOracle::new();
        let ctx = ResolveContext::new(config, &oracle);
        let tag = shared.version.clone().unwrap_or_default();
        merge_shared(ctx, registry, entry, shared, &tag)
    }

    #[test]
    fn test_merge_new_versions_sorted_descending() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");
        let mfe2 = remote_entry("team/mfe2", "http://my.service/mfe2/remoteEntry.json");

        merge(&config, &mut registry, &mfe1, &shared_info("dep-a", Some("1.2.1"), "~1.2.1")).unwrap();
        merge(&config, &mut registry, &mfe2, &shared_info("dep-a", Some("1.10.0"), "^1.2.1")).unwrap();

        let external = registry.shared_external("dep-a", None).unwrap();
        assert!(external.dirty);
        let tags: Vec<&str> = external.versions.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(tags, vec!["1.10.0", "1.2.1"]);
        assert!(external.versions.iter().all(|v| v.action == Action::Skip));
    }

    #[test]
    fn test_merge_same_tag_appends_ref() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");
        let mfe2 = remote_entry("team/mfe2", "http://my.service/mfe2/remoteEntry.json");
        let dep = shared_info("dep-a", Some("1.2.3"), "~1.2.1");

        merge(&config, &mut registry, &mfe1, &dep).unwrap();
        merge(&config, &mut registry, &mfe2, &dep).unwrap();

        let external = registry.shared_external("dep-a", None).unwrap();
        assert_eq!(external.versions.len(), 1);
        let names: Vec<&str> = external.versions[0]
            .remotes
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["team/mfe1", "team/mfe2"]);
    }

    #[test]
    fn test_merge_host_ref_goes_first() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");
        let mut host = remote_entry("host", "http://my.service/remoteEntry.json");
        host.host = true;
        let dep = shared_info("dep-a", Some("1.2.3"), "~1.2.1");

        merge(&config, &mut registry, &mfe1, &dep).unwrap();
        merge(&config, &mut registry, &host, &dep).unwrap();

        let version = &registry.shared_external("dep-a", None).unwrap().versions[0];
        assert!(version.host);
        assert_eq!(version.remotes[0].name, "host");
        assert_eq!(version.remotes[1].name, "team/mfe1");
    }

    #[test]
    fn test_merge_same_remote_does_not_duplicate() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");

        merge(&config, &mut registry, &mfe1, &shared_info("dep-a", Some("1.2.3"), "~1.2.1")).unwrap();
        merge(&config, &mut registry, &mfe1, &shared_info("dep-a", Some("1.2.3"), "~1.2.1")).unwrap();
        merge(&config, &mut registry, &mfe1, &shared_info("dep-a", Some("1.2.4"), "~1.2.1")).unwrap();

        let external = registry.shared_external("dep-a", None).unwrap();
        assert_eq!(external.versions.len(), 1);
        assert_eq!(external.versions[0].tag, "1.2.4");
        assert_eq!(external.versions[0].remotes.len(), 1);
    }

    #[test]
    fn test_merge_strict_scope_shares_and_stays_clean() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");
        let mut dep = shared_info("dep-a", Some("1.2.3"), "~1.2.1");
        dep.share_scope = Some(STRICT_SCOPE.to_string());

        merge(&config, &mut registry, &mfe1, &dep).unwrap();

        let external = registry.shared_external("dep-a", Some(STRICT_SCOPE)).unwrap();
        assert!(!external.dirty);
        assert_eq!(external.versions[0].action, Action::Share);
    }

    #[test]
    fn test_merge_range_conflict_warns_by_default() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");
        let mfe2 = remote_entry("team/mfe2", "http://my.service/mfe2/remoteEntry.json");
        let mut strict_dep = shared_info("dep-a", Some("1.2.3"), "^1.2.0");
        strict_dep.strict_version = true;

        merge(&config, &mut registry, &mfe1, &shared_info("dep-a", Some("1.2.3"), "~1.2.1")).unwrap();
        merge(&config, &mut registry, &mfe2, &strict_dep).unwrap();

        let external = registry.shared_external("dep-a", None).unwrap();
        assert_eq!(external.versions[0].remotes.len(), 2);
    }

    #[test]
    fn test_merge_range_conflict_fails_under_strict_compatibility() {
        let config = Config {
            strict: StrictFlags {
                external_compatibility: true,
                ..StrictFlags::default()
            },
            ..Config::default()
        };
        let mut registry = Registry::new();
        let mfe1 = remote_entry("team/mfe1", "http://my.service/mfe1/remoteEntry.json");
        let mfe2 = remote_entry("team/mfe2", "http://my.service/mfe2/remoteEntry.json");
        let mut strict_dep = shared_info("dep-a", Some("1.2.3"), "^1.2.0");
        strict_dep.strict_version = true;

        merge(&config, &mut registry, &mfe1, &shared_info("dep-a", Some("1.2.3"), "~1.2.1")).unwrap();
        let result = merge(&config, &mut registry, &mfe2, &strict_dep);

        assert!(matches!(
            result,
            Err(FederationError::VersionRangeConflict { .. })
        ));
    }
}
