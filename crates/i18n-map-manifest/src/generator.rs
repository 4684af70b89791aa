//! i18n map generation
//!
//! One run either rebuilds the map from scratch and writes it when its
//! content changed, or, when the project declares neither a plugin nor a
//! theme slug, removes any map left over from an earlier run.

use crate::errors::ManifestError;
use crate::manifest_writer::{self, WriteOutcome};
use crate::types::{Manifest, PackageRecord, RootConfig, Target};
use i18n_map_logger as logger;
use std::path::{Path, PathBuf};

/// Everything one generation run needs
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub root: &'a RootConfig,
    /// Installed packages in the order the host reports them
    pub packages: &'a [PackageRecord],
    /// Only packages of this type contribute
    pub package_type: &'a str,
    pub output: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Written { path: PathBuf, manifest: Manifest },
    Unchanged { path: PathBuf, manifest: Manifest },
    /// No slug configured; `existed` tells whether a stale map was deleted
    Removed { path: PathBuf, existed: bool },
}

/// Build the map for `target` from the installed packages
///
/// Versions are aliased through the *root* project's `branch-alias` table,
/// never the package's own. That mirrors what existing consumers of the map
/// have always received; it is probably a latent defect, so keep it
/// deliberate if it is ever changed.
pub fn build_manifest(
    target: Target,
    root: &RootConfig,
    packages: &[PackageRecord],
    package_type: &str,
) -> Manifest {
    let mut manifest = Manifest::new(target);

    for package in packages.iter().filter(|p| p.package_type == package_type) {
        let version = root.alias_version(&package.version);

        match package.effective_textdomain() {
            Some(textdomain) => {
                manifest.insert(textdomain, version);
                logger::info(&format!(
                    "  {} ({}): textdomain is {}",
                    package.name, version, textdomain
                ));
            }
            None => {
                logger::info(&format!("  {} ({}): no textdomain set", package.name, version));
            }
        }
    }

    manifest
}

/// Resolve the target and build the map, or `None` when no slug is configured
pub fn plan_manifest(
    root: &RootConfig,
    packages: &[PackageRecord],
    package_type: &str,
) -> Option<Manifest> {
    root.target()
        .map(|target| build_manifest(target, root, packages, package_type))
}

/// Run one generation: write the map if it changed, or clean up a stale one
pub fn generate_manifest(request: &GenerateRequest<'_>) -> Result<GenerateOutcome, ManifestError> {
    logger::info(&format!("Generating {} i18n map", request.package_type));

    let Some(manifest) = plan_manifest(request.root, request.packages, request.package_type) else {
        logger::warn(&format!(
            "Skipping {} i18n map generation, .extra.wp-plugin-slug / .extra.wp-theme-slug is not set in composer.json",
            request.package_type
        ));
        let existed = manifest_writer::remove_if_exists(request.output)?;
        if existed {
            logger::info(&format!("Removed stale {}", request.output.display()));
        }
        return Ok(GenerateOutcome::Removed {
            path: request.output.to_path_buf(),
            existed,
        });
    };

    logger::step(&format!(
        "{} textdomain(s) for {} '{}'",
        manifest.packages.len(),
        manifest.manifest_type,
        manifest.domain
    ));

    let path = request.output.to_path_buf();
    match manifest_writer::write_to_path(&manifest, request.output)? {
        WriteOutcome::Written => Ok(GenerateOutcome::Written { path, manifest }),
        WriteOutcome::Unchanged => Ok(GenerateOutcome::Unchanged { path, manifest }),
    }
}
