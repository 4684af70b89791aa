use super::generate::GenerateArgs;
use crate::context::ProjectContext;
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use i18n_map_manifest::remove_if_exists;

pub fn handle_clean(args: &GenerateArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    let ctx = ProjectContext::load(opts, &args.overrides())?;
    let output = &ctx.paths.output;

    if remove_if_exists(output)? {
        logger::success(&format!("Removed {}", output.display()));
    } else {
        logger::info(&format!("Nothing to remove at {}", output.display()));
    }
    Ok(())
}
