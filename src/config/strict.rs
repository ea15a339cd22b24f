//! Strict flags
//!
//! Each flag turns one class of policy warning into a hard failure:
//!
//! | flag                    | governs                                            |
//! |-------------------------|----------------------------------------------------|
//! | `externalVersion`       | invalid or missing shared versions                 |
//! | `externalCompatibility` | range conflicts, incompatible strict versions      |
//! | `remoteEntry`           | failed manifest/remote entry fetches               |
//! | `importMap`             | missing override targets, multiple shared versions |

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StrictFlags {
    pub external_version: bool,
    pub external_compatibility: bool,
    pub remote_entry: bool,
    pub import_map: bool,
}

impl StrictFlags {
    /// Every flag enabled
    pub fn all() -> Self {
        Self {
            external_version: true,
            external_compatibility: true,
            remote_entry: true,
            import_map: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FlagObject {
    #[serde(default)]
    external_version: bool,
    #[serde(default)]
    external_compatibility: bool,
    #[serde(default)]
    remote_entry: bool,
    #[serde(default)]
    import_map: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrictSetting {
    All(bool),
    Flags(FlagObject),
}

impl<'de> Deserialize<'de> for StrictFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StrictSetting::deserialize(deserializer)? {
            StrictSetting::All(true) => StrictFlags::all(),
            StrictSetting::All(false) => StrictFlags::default(),
            StrictSetting::Flags(flags) => StrictFlags {
                external_version: flags.external_version,
                external_compatibility: flags.external_compatibility,
                remote_entry: flags.remote_entry,
                import_map: flags.import_map,
            },
        })
    }
}
