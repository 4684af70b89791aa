//! Tool settings loaded from `i18n-map.toml`
//!
//! Resolution order for the settings file:
//! 1. `I18N_MAP_CONFIG` when set and non-empty
//! 2. `<project>/i18n-map.toml` when it exists
//! 3. the user-level `i18n-map/config.toml` when it exists
//! 4. `<project>/i18n-map.toml` (may not exist; defaults apply)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "i18n-map.toml";
pub const CONFIG_ENV_VAR: &str = "I18N_MAP_CONFIG";

/// Package type whose members contribute to the map
pub const DEFAULT_PACKAGE_TYPE: &str = "jetpack-library";
/// Output file, relative to the project root
pub const DEFAULT_OUTPUT_PATH: &str = "jetpack_vendor/i18n-map.php";
pub const DEFAULT_VENDOR_DIR: &str = "vendor";

/// Keys accepted by `config set`, in display order
pub const SETTINGS_KEYS: &[&str] = &["package-type", "output-path", "vendor-dir"];

#[derive(Debug)]
pub enum SettingsError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    UnknownKey(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            SettingsError::Parse(path, e) => {
                write!(f, "Failed to parse {}: {}", path.display(), e)
            }
            SettingsError::Serialize(e) => write!(f, "Failed to serialize settings: {}", e),
            SettingsError::UnknownKey(key) => write!(
                f,
                "Unknown config key: {}. Supported keys: {}",
                key,
                SETTINGS_KEYS.join(", ")
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(_, e) => Some(e),
            SettingsError::Parse(_, e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
            SettingsError::UnknownKey(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_dir: Option<String>,
}

impl Settings {
    /// Resolve the settings file for a project, honoring `I18N_MAP_CONFIG`
    pub fn path(project_root: &Path) -> PathBuf {
        let env_override = std::env::var(CONFIG_ENV_VAR).ok();
        let user = user_settings_path();
        resolve_path(project_root, env_override.as_deref(), user.as_deref())
    }

    /// Load settings for a project, returning defaults if no file exists
    pub fn load(project_root: &Path) -> Result<Self, SettingsError> {
        Self::load_from_path(&Self::path(project_root))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| SettingsError::Io(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| SettingsError::Parse(path.to_path_buf(), e))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SettingsError::Io(parent.to_path_buf(), e))?;
        }
        let content = toml::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        fs::write(path, content).map_err(|e| SettingsError::Io(path.to_path_buf(), e))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "package-type" => self.package_type.clone(),
            "output-path" => self.output_path.clone(),
            "vendor-dir" => self.vendor_dir.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        match key {
            "package-type" => self.package_type = Some(value),
            "output-path" => self.output_path = Some(value),
            "vendor-dir" => self.vendor_dir = Some(value),
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Explicitly set values, in `SETTINGS_KEYS` order
    pub fn values_iter(&self) -> Vec<(&str, String)> {
        SETTINGS_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    pub fn package_type(&self) -> &str {
        self.package_type.as_deref().unwrap_or(DEFAULT_PACKAGE_TYPE)
    }

    pub fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }
}

fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("i18n-map").join("config.toml"))
}

fn resolve_path(project_root: &Path, env_override: Option<&str>, user: Option<&Path>) -> PathBuf {
    if let Some(trimmed) = env_override.map(str::trim).filter(|p| !p.is_empty()) {
        return PathBuf::from(trimmed);
    }

    let project = project_root.join(SETTINGS_FILE_NAME);
    if project.exists() {
        return project;
    }

    match user {
        Some(user) if user.exists() => user.to_path_buf(),
        _ => project,
    }
}
