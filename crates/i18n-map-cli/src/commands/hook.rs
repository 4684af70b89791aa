use super::generate::{report_outcome, GenerateArgs};
use crate::context::ProjectContext;
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use i18n_map_manifest::{dispatch, GenerateRequest, LifecycleEvent};

/// Handle a host lifecycle event (`post-install-cmd` / `post-update-cmd`)
pub fn handle_hook(event: &str, args: &GenerateArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    let event: LifecycleEvent = event.parse()?;
    logger::step(&format!("Handling {event}"));

    let ctx = ProjectContext::load(opts, &args.overrides())?;
    let root = ctx.root_config()?;
    let packages = ctx.installed_packages()?;

    let outcome = dispatch(
        event,
        &GenerateRequest {
            root,
            packages: &packages,
            package_type: &ctx.package_type,
            output: &ctx.paths.output,
        },
    )?;
    report_outcome(&outcome);
    Ok(())
}
