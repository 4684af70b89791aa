//! Persistence for the generated map
//!
//! Writes are content-addressed: the rendered file is compared with what is
//! on disk and only written when the bytes differ, so an unchanged map keeps
//! its modification time. Changed content goes to a sibling temp file that is
//! then renamed over the target.

use crate::errors::ManifestError;
use crate::php_map;
use crate::types::Manifest;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Write `content` to `path` unless the file already holds exactly these bytes
pub fn write_if_modified(path: &Path, content: &str) -> Result<WriteOutcome, ManifestError> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            debug!("Content unchanged, skipping write: {:?}", path);
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ManifestError::io(path)(e)),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ManifestError::io(parent))?;
    }

    let temp_path = temp_path_for(path);
    debug!("Writing to temp file: {:?}", temp_path);
    if let Err(e) = write_file(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(ManifestError::io(&temp_path)(e));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(ManifestError::io(path)(e));
    }

    info!("Wrote {:?}", path);
    Ok(WriteOutcome::Written)
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("i18n-map"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Remove `path`; returns whether a file was actually removed
pub fn remove_if_exists(path: &Path) -> Result<bool, ManifestError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ManifestError::io(path)(e)),
    }
}

/// Render a manifest and write it if it changed
pub fn write_to_path(manifest: &Manifest, output_path: &Path) -> Result<WriteOutcome, ManifestError> {
    write_if_modified(output_path, &php_map::render(manifest))
}

/// Read a generated map back from disk
pub fn read_from_path(manifest_path: &Path) -> Result<Manifest, ManifestError> {
    debug!("Reading i18n map from: {:?}", manifest_path);
    let content = fs::read_to_string(manifest_path).map_err(ManifestError::io(manifest_path))?;
    php_map::parse(&content)
}
