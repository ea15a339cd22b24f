//! Show command implementation

use std::fmt::Write as _;

use console::Style;

use crate::cli::ShowArgs;
use crate::domain::{Action, SharedVersion};
use crate::error::{FederationError, Result};
use crate::store::{JsonFileStorage, Storage, StoreState};

use super::GlobalArgs;

/// Run show command
pub fn run(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let store_dir = std::env::current_dir()?.join(&global.store);
    let state = JsonFileStorage::new(&store_dir).read()?;

    if args.externals {
        print!("{}", render_externals(&state));
    } else {
        let json = state
            .import_map
            .to_json()
            .map_err(|e| FederationError::IoError {
                message: format!("Failed to serialize import map: {e}"),
            })?;
        println!("{json}");
    }
    Ok(())
}

/// Per-scope listing of shared externals, followed by scoped externals per remote
fn render_externals(state: &StoreState) -> String {
    let mut out = String::new();

    if state.shared_externals.is_empty() && state.scoped_externals.is_empty() {
        out.push_str("No externals cached.\n");
        return out;
    }

    let header = Style::new().bold().yellow();
    let package = Style::new().bold();

    for (scope, externals) in &state.shared_externals {
        let _ = writeln!(out, "{}", header.apply_to(format!("[{scope}]")));
        for (name, external) in externals {
            let dirty = if external.dirty { " (dirty)" } else { "" };
            let _ = writeln!(out, "  {}{dirty}", package.apply_to(name));
            for version in &external.versions {
                let _ = writeln!(out, "    {}", version_line(version));
            }
        }
    }

    for (remote, externals) in &state.scoped_externals {
        let _ = writeln!(out, "{}", header.apply_to(format!("[scoped: {remote}]")));
        for (name, external) in externals {
            let _ = writeln!(out, "  {} {} {}", package.apply_to(name), external.tag, external.file);
        }
    }
    out
}

fn version_line(version: &SharedVersion) -> String {
    let action = match version.action {
        Action::Share => Style::new().green(),
        Action::Skip => Style::new().dim(),
        Action::Scope => Style::new().yellow(),
        Action::Override => Style::new().cyan(),
    };
    let remotes = version
        .remotes
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let host = if version.host { " host" } else { "" };

    format!(
        "{:<12} {:<8} {remotes}{host}",
        version.tag,
        action.apply_to(version.action.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GLOBAL_SCOPE, ScopedExternal, SharedExternal};
    use crate::test_fixtures::{remote_ref, shared_version};

    #[test]
    fn test_render_empty_store() {
        assert_eq!(render_externals(&StoreState::default()), "No externals cached.\n");
    }

    #[test]
    fn test_render_shared_and_scoped() {
        let mut state = StoreState::default();
        state.shared_externals.entry(GLOBAL_SCOPE.to_string()).or_default().insert(
            "dep-a".to_string(),
            SharedExternal {
                dirty: false,
                versions: vec![
                    shared_version("1.2.3", Action::Share, &[remote_ref("team/mfe1")]),
                    shared_version("1.2.1", Action::Skip, &[remote_ref("team/mfe2")]),
                ],
            },
        );
        state.scoped_externals.entry("team/mfe1".to_string()).or_default().insert(
            "dep-b".to_string(),
            ScopedExternal {
                tag: "2.0.0".to_string(),
                file: "dep-b.js".to_string(),
                bundle: None,
            },
        );

        let rendered = console::strip_ansi_codes(&render_externals(&state)).to_string();

        assert!(rendered.contains("[__GLOBAL__]"));
        assert!(rendered.contains("dep-a"));
        assert!(rendered.contains("1.2.3        share    team/mfe1"));
        assert!(rendered.contains("1.2.1        skip     team/mfe2"));
        assert!(rendered.contains("[scoped: team/mfe1]"));
        assert!(rendered.contains("dep-b 2.0.0 dep-b.js"));
    }
}
