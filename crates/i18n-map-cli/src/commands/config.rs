use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::Colorize;
use i18n_map_config::{Settings, DEFAULT_OUTPUT_PATH, DEFAULT_PACKAGE_TYPE, SETTINGS_KEYS};

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective settings for the project
    Show,
    /// Set a value in the settings file (package-type, output-path, vendor-dir)
    Set { key: String, value: String },
    /// Print the settings file path in use
    Path,
}

pub fn handle_config(action: &ConfigAction, opts: &GlobalOpts) -> Result<(), CliError> {
    let root = opts.project_dir.as_path();
    let settings_path = Settings::path(root);
    logger::debug(&format!("Reading settings from: {}", settings_path.display()));

    match action {
        ConfigAction::Show => {
            let settings = Settings::load_from_path(&settings_path)?;
            let values = settings.values_iter();
            println!("{}", "Configuration:".bold().green());
            for key in SETTINGS_KEYS {
                match values.iter().find(|(set_key, _)| set_key == key) {
                    Some((_, value)) => println!("  {}: {}", key.cyan(), value),
                    None => println!("  {}: {}", key.cyan(), default_label(key).dimmed()),
                }
            }
            if values.is_empty() && opts.verbosity_level() > 0 {
                println!("  {}", "(all defaults)".yellow());
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load_from_path(&settings_path)?;
            settings.set(key, value.clone())?;
            settings.save_to_path(&settings_path)?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path => {
            println!("{}", settings_path.display());
        }
    }
    Ok(())
}

fn default_label(key: &str) -> String {
    match key {
        "package-type" => format!("{} (default)", DEFAULT_PACKAGE_TYPE),
        "output-path" => format!("{} (default)", DEFAULT_OUTPUT_PATH),
        _ => "(from composer.json)".to_string(),
    }
}
