//! Configuration for the i18n-map CLI
//!
//! Two concerns live here so that the manifest crate and the CLI agree on them:
//! - `settings`: the optional `i18n-map.toml` tool settings
//! - `project_paths`: where the Composer inputs and the generated map live

pub mod project_paths;
pub mod settings;

pub use project_paths::{PathError, ProjectPaths, COMPOSER_JSON, INSTALLED_JSON};
pub use settings::{
    Settings, SettingsError, CONFIG_ENV_VAR, DEFAULT_OUTPUT_PATH, DEFAULT_PACKAGE_TYPE,
    DEFAULT_VENDOR_DIR, SETTINGS_FILE_NAME, SETTINGS_KEYS,
};
