use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while building or persisting the i18n map
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid i18n map at line {line}: {message}")]
    MapParse { line: usize, message: String },

    #[error("Invalid manifest type '{0}' (expected 'plugins' or 'themes')")]
    InvalidManifestType(String),

    #[error("Unknown lifecycle event '{0}' (expected 'post-install-cmd' or 'post-update-cmd')")]
    UnknownEvent(String),
}

impl ManifestError {
    /// Build a mapper that tags an `io::Error` with the path it happened on
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> ManifestError + '_ {
        move |source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
