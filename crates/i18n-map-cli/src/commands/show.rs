use super::generate::GenerateArgs;
use crate::context::ProjectContext;
use crate::errors::CliError;
use crate::GlobalOpts;
use clap::ValueEnum;
use i18n_map_manifest::{php_map, read_from_path};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowFormat {
    #[default]
    Php,
    Json,
}

/// Print the current map, normalized to the generated layout
pub fn handle_show(
    format: ShowFormat,
    args: &GenerateArgs,
    opts: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = ProjectContext::load(opts, &args.overrides())?;
    let manifest = read_from_path(&ctx.paths.output)?;

    match format {
        ShowFormat::Php => print!("{}", php_map::render(&manifest)),
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&manifest)?),
    }
    Ok(())
}
