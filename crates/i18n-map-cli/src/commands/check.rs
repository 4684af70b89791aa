use super::generate::GenerateArgs;
use crate::context::ProjectContext;
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use i18n_map_manifest::{php_map, plan_manifest};
use std::fs;
use std::io;

/// Verify the map on disk matches what `generate` would write, without writing
pub fn handle_check(args: &GenerateArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    let ctx = ProjectContext::load(opts, &args.overrides())?;
    let root = ctx.root_config()?;
    let packages = ctx.installed_packages()?;
    let output = &ctx.paths.output;

    let existing = match fs::read(output) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(i18n_map_manifest::ManifestError::Io {
                path: output.clone(),
                source: e,
            }
            .into())
        }
    };

    match (plan_manifest(root, &packages, &ctx.package_type), existing) {
        (Some(manifest), Some(bytes)) if php_map::render(&manifest).as_bytes() == bytes => {
            logger::success(&format!("i18n map is up to date: {}", output.display()));
            Ok(())
        }
        (Some(_), Some(_)) => Err(CliError::Stale(format!(
            "{} differs from the installed packages, run `i18n-map generate`",
            output.display()
        ))),
        (Some(_), None) => Err(CliError::Stale(format!(
            "{} is missing, run `i18n-map generate`",
            output.display()
        ))),
        (None, Some(_)) => Err(CliError::Stale(format!(
            "{} exists but no wp-plugin-slug / wp-theme-slug is configured",
            output.display()
        ))),
        (None, None) => {
            logger::success("No slug configured and no i18n map present");
            Ok(())
        }
    }
}
