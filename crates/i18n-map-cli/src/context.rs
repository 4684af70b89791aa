use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use i18n_map_config::{PathError, ProjectPaths, Settings, DEFAULT_VENDOR_DIR};
use i18n_map_manifest::{
    read_composer_json, read_installed_json, ComposerJson, PackageRecord, RootConfig,
};

/// Per-invocation overrides for settings values
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<String>,
    pub package_type: Option<String>,
}

/// Composer inputs and resolved paths for one project
pub struct ProjectContext {
    pub composer: Option<ComposerJson>,
    pub paths: ProjectPaths,
    pub package_type: String,
}

impl ProjectContext {
    pub fn load(opts: &GlobalOpts, overrides: &Overrides) -> Result<Self, CliError> {
        let root = opts.project_dir.as_path();
        let settings = Settings::load(root)?;

        let output = overrides
            .output
            .as_deref()
            .unwrap_or_else(|| settings.output_path());
        let package_type = overrides
            .package_type
            .as_deref()
            .unwrap_or_else(|| settings.package_type())
            .to_string();

        let vendor_dir = settings.vendor_dir.as_deref().unwrap_or(DEFAULT_VENDOR_DIR);
        let mut paths = ProjectPaths::resolve(root, vendor_dir, output)?;

        let composer = match paths.require_composer_json() {
            Ok(composer_path) => Some(read_composer_json(composer_path)?),
            Err(_) => None,
        };
        if settings.vendor_dir.is_none() {
            if let Some(vendor_dir) = composer.as_ref().and_then(|c| c.vendor_dir.as_deref()) {
                paths.set_vendor_dir(vendor_dir);
            }
        }

        logger::debug(&format!(
            "Project {} (vendor: {}, output: {})",
            paths.root.display(),
            paths.vendor_dir.display(),
            paths.output.display()
        ));

        Ok(ProjectContext {
            composer,
            paths,
            package_type,
        })
    }

    /// Root configuration from composer.json; generation cannot run without it
    pub fn root_config(&self) -> Result<&RootConfig, CliError> {
        self.composer
            .as_ref()
            .map(|c| &c.root)
            .ok_or_else(|| PathError::ComposerJsonMissing(self.paths.root.clone()).into())
    }

    pub fn installed_packages(&self) -> Result<Vec<PackageRecord>, CliError> {
        Ok(read_installed_json(&self.paths.installed_json)?)
    }
}
