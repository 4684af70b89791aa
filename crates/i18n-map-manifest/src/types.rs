//! Data model for i18n map generation

use crate::errors::ManifestError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ROOT CONFIGURATION - the `extra` section of the project's composer.json
// =============================================================================

/// Root project settings relevant to map generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(
        rename = "wp-plugin-slug",
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub plugin_slug: Option<String>,
    #[serde(
        rename = "wp-theme-slug",
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme_slug: Option<String>,
    #[serde(
        rename = "branch-alias",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub branch_alias: IndexMap<String, String>,
}

impl RootConfig {
    /// Domain and map type for this project; the plugin slug wins over the theme slug
    pub fn target(&self) -> Option<Target> {
        if let Some(domain) = &self.plugin_slug {
            return Some(Target {
                domain: domain.clone(),
                manifest_type: ManifestType::Plugins,
            });
        }
        self.theme_slug.as_ref().map(|domain| Target {
            domain: domain.clone(),
            manifest_type: ManifestType::Themes,
        })
    }

    /// Apply the root branch-alias table to a version string
    pub fn alias_version<'a>(&'a self, version: &'a str) -> &'a str {
        self.branch_alias
            .get(version)
            .map_or(version, String::as_str)
    }
}

/// Strings and numbers are usable as text; anything else counts as unset
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub domain: String,
    pub manifest_type: ManifestType,
}

// =============================================================================
// PACKAGE RECORD - one entry of the installed package set
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub package_type: String,
    pub version: String,
    pub textdomain: Option<String>,
    /// The package's own branch aliases. Carried for completeness; map
    /// generation reads the root table instead.
    pub branch_alias: IndexMap<String, String>,
}

impl PackageRecord {
    /// The textdomain, unless it is absent or empty
    ///
    /// `"0"` counts as empty, matching how the host's own tooling treats
    /// falsy strings.
    pub fn effective_textdomain(&self) -> Option<&str> {
        self.textdomain
            .as_deref()
            .filter(|domain| !domain.is_empty() && *domain != "0")
    }
}

// =============================================================================
// MANIFEST - the generated map
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestType {
    Plugins,
    Themes,
}

impl ManifestType {
    pub fn as_str(self) -> &'static str {
        match self {
            ManifestType::Plugins => "plugins",
            ManifestType::Themes => "themes",
        }
    }
}

impl fmt::Display for ManifestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestType {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plugins" => Ok(ManifestType::Plugins),
            "themes" => Ok(ManifestType::Themes),
            other => Err(ManifestError::InvalidManifestType(other.to_string())),
        }
    }
}

/// Translation-domain to version map for one plugin or theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub domain: String,
    #[serde(rename = "type")]
    pub manifest_type: ManifestType,
    /// textdomain -> version, in package iteration order
    #[serde(default)]
    pub packages: IndexMap<String, String>,
}

impl Manifest {
    pub fn new(target: Target) -> Self {
        Manifest {
            domain: target.domain,
            manifest_type: target.manifest_type,
            packages: IndexMap::new(),
        }
    }

    /// Record a textdomain; a repeated key keeps its position and takes the new version
    pub fn insert(&mut self, textdomain: &str, version: &str) {
        self.packages
            .insert(textdomain.to_string(), version.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
