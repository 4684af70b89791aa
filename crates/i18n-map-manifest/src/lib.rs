//! i18n map generation
//!
//! Builds the translation-domain to version map for a Composer project and
//! keeps the generated PHP file in sync with it:
//! - `composer`: reads root configuration and the installed package set
//! - `generator`: target resolution, filtering, aliasing, write or cleanup
//! - `php_map`: renders and parses the generated PHP file
//! - `manifest_writer`: content-addressed writes and tolerant deletes
//! - `hooks`: the lifecycle events that trigger generation

pub mod composer;
pub mod errors;
pub mod generator;
pub mod hooks;
pub mod manifest_writer;
pub mod php_map;
pub mod types;

pub use composer::{read_composer_json, read_installed_json, ComposerJson};
pub use errors::ManifestError;
pub use generator::{
    build_manifest, generate_manifest, plan_manifest, GenerateOutcome, GenerateRequest,
};
pub use hooks::{dispatch, subscribed_events, EventHandler, LifecycleEvent};
pub use manifest_writer::{
    read_from_path, remove_if_exists, write_if_modified, write_to_path, WriteOutcome,
};
pub use types::{Manifest, ManifestType, PackageRecord, RootConfig, Target};
