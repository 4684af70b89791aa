//! Composer inputs: the root `composer.json` and `installed.json`
//!
//! `installed.json` comes in two layouts:
//! - Composer 1: a top-level array of packages
//! - Composer 2: `{"packages": [...], "dev": ..., "dev-package-names": [...]}`

use crate::errors::ManifestError;
use crate::types::{scalar_to_string, PackageRecord, RootConfig};
use i18n_map_logger as logger;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Composer's default package type
const DEFAULT_PACKAGE_TYPE: &str = "library";

/// The parts of composer.json this tool reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerJson {
    pub root: RootConfig,
    /// `config.vendor-dir`, when set
    pub vendor_dir: Option<String>,
}

#[derive(Deserialize, Default)]
struct ComposerJsonFile {
    #[serde(default)]
    extra: RootConfig,
    #[serde(default)]
    config: ComposerConfigSection,
}

#[derive(Deserialize, Default)]
struct ComposerConfigSection {
    #[serde(rename = "vendor-dir", default)]
    vendor_dir: Option<String>,
}

#[derive(Deserialize)]
struct InstalledPackage {
    name: String,
    #[serde(rename = "type", default)]
    package_type: Option<String>,
    #[serde(default)]
    version: String,
    #[serde(default)]
    version_normalized: Option<String>,
    #[serde(default)]
    extra: Map<String, Value>,
}

impl From<InstalledPackage> for PackageRecord {
    fn from(package: InstalledPackage) -> Self {
        let textdomain = package.extra.get("textdomain").and_then(scalar_to_string);
        let branch_alias = package
            .extra
            .get("branch-alias")
            .and_then(Value::as_object)
            .map(|aliases| {
                aliases
                    .iter()
                    .filter_map(|(from, to)| to.as_str().map(|to| (from.clone(), to.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        PackageRecord {
            name: package.name,
            package_type: package
                .package_type
                .unwrap_or_else(|| DEFAULT_PACKAGE_TYPE.to_string()),
            // The host identifies an installed package by its normalized version
            version: package.version_normalized.unwrap_or(package.version),
            textdomain,
            branch_alias,
        }
    }
}

/// Read the root project's composer.json
pub fn read_composer_json(path: &Path) -> Result<ComposerJson, ManifestError> {
    debug!("Reading composer.json from: {:?}", path);
    let content = fs::read_to_string(path).map_err(ManifestError::io(path))?;
    parse_composer_json(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_composer_json(content: &str) -> Result<ComposerJson, serde_json::Error> {
    let file: ComposerJsonFile = serde_json::from_str(content)?;
    Ok(ComposerJson {
        root: file.extra,
        vendor_dir: file.config.vendor_dir,
    })
}

/// Read the installed package set, in the order Composer recorded it
///
/// A missing file means nothing is installed yet.
pub fn read_installed_json(path: &Path) -> Result<Vec<PackageRecord>, ManifestError> {
    debug!("Reading installed packages from: {:?}", path);
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logger::debug(&format!(
                "No installed.json at {}, assuming no packages",
                path.display()
            ));
            return Ok(Vec::new());
        }
        Err(e) => return Err(ManifestError::io(path)(e)),
    };

    let packages = parse_installed_json(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Found {} installed packages", packages.len());
    Ok(packages)
}

pub fn parse_installed_json(content: &str) -> Result<Vec<PackageRecord>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    let packages = match value {
        Value::Object(mut object) => object
            .remove("packages")
            .unwrap_or_else(|| Value::Array(Vec::new())),
        other => other,
    };
    let packages: Vec<InstalledPackage> = serde_json::from_value(packages)?;
    Ok(packages.into_iter().map(PackageRecord::from).collect())
}

#[cfg(test)]
pub(crate) fn alias_table<const N: usize>(
    pairs: [(&str, &str); N],
) -> indexmap::IndexMap<String, String> {
    pairs
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}
