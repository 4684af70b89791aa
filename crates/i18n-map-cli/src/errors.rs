//! Error type for CLI command handlers

use i18n_map_config::{PathError, SettingsError};
use i18n_map_manifest::ManifestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Failed to serialize i18n map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i18n map is out of date: {0}")]
    Stale(String),
}
