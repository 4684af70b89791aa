use crate::context::{Overrides, ProjectContext};
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use clap::Args;
use i18n_map_manifest::{generate_manifest, GenerateOutcome, GenerateRequest};

/// Options shared by every command that builds the map
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Output file, relative to the project directory
    #[arg(short, long)]
    pub output: Option<String>,
    /// Package type whose members are mapped
    #[arg(long)]
    pub package_type: Option<String>,
}

impl GenerateArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            package_type: self.package_type.clone(),
        }
    }
}

pub fn handle_generate(args: &GenerateArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    let ctx = ProjectContext::load(opts, &args.overrides())?;
    let root = ctx.root_config()?;
    let packages = ctx.installed_packages()?;

    let outcome = generate_manifest(&GenerateRequest {
        root,
        packages: &packages,
        package_type: &ctx.package_type,
        output: &ctx.paths.output,
    })?;
    report_outcome(&outcome);
    Ok(())
}

pub(crate) fn report_outcome(outcome: &GenerateOutcome) {
    match outcome {
        GenerateOutcome::Written { path, manifest } => logger::success(&format!(
            "Wrote i18n map for {} '{}' ({} textdomain(s)) to {}",
            manifest.manifest_type,
            manifest.domain,
            manifest.packages.len(),
            path.display()
        )),
        GenerateOutcome::Unchanged { path, .. } => {
            logger::info(&format!("i18n map is up to date: {}", path.display()));
        }
        GenerateOutcome::Removed { .. } => {}
    }
}
