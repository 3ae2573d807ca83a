//! Built site contents and writing them to disk.

use crate::error::BuildError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Output relative path (`/`-separated) → file bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteOutput {
    files: BTreeMap<String, Vec<u8>>,
}

impl SiteOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Returns `true` if an earlier file at the same path was replaced.
    pub fn insert(&mut self, rel_path: impl Into<String>, bytes: Vec<u8>) -> bool {
        self.files.insert(rel_path.into(), bytes).is_some()
    }

    pub fn get(&self, rel_path: &str) -> Option<&[u8]> {
        self.files.get(rel_path).map(Vec::as_slice)
    }

    /// Convenience accessor for text outputs
    pub fn get_str(&self, rel_path: &str) -> Option<&str> {
        self.get(rel_path).and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Remove `dst` (if present) and recreate it empty
pub fn prepare_destination(dst: &Path) -> Result<(), BuildError> {
    let destination_error = |source: std::io::Error| BuildError::Destination {
        path: dst.to_path_buf(),
        source,
    };

    match fs::remove_dir_all(dst) {
        Ok(()) => tracing::debug!("Removed previous output at {:?}", dst),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(destination_error(err)),
    }
    fs::create_dir_all(dst).map_err(destination_error)
}

/// Write every file under `dst`, creating subdirectories as needed.
///
/// Stops at the first failure.
pub fn write_site(dst: &Path, site: &SiteOutput) -> Result<(), BuildError> {
    for (rel_path, bytes) in site.iter() {
        let path = dst.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, bytes).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {:?}", path);
    }

    tracing::info!("Wrote {} files to {:?}", site.len(), dst);
    Ok(())
}
