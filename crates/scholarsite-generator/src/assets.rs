//! Static asset copying.
//!
//! Files under the static directory (avatars, project images, PDFs) are
//! copied into the output directory with their relative paths kept.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies static files into the output directory.
#[derive(Debug, Default)]
pub struct AssetProcessor {
    copied: Vec<String>,
}

impl AssetProcessor {
    /// Create a new asset processor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every non-hidden file from `source_dir` into `dest_dir`.
    ///
    /// Returns the site-relative URL paths of the copied files.
    pub fn process(mut self, source_dir: &Path, dest_dir: &Path) -> Result<Vec<String>> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "processing assets"
        );

        if !source_dir.exists() {
            debug!("source directory does not exist, skipping");
            return Ok(Vec::new());
        }

        self.process_dir(source_dir, source_dir, dest_dir)?;
        self.copied.sort();

        info!(count = self.copied.len(), "assets processed");
        Ok(self.copied)
    }

    fn process_dir(&mut self, base_dir: &Path, current_dir: &Path, dest_base: &Path) -> Result<()> {
        for entry in fs::read_dir(current_dir)? {
            let entry = entry?;
            let path = entry.path();

            // Skip hidden files/directories
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }

            if path.is_dir() {
                self.process_dir(base_dir, &path, dest_base)?;
            } else if path.is_file() {
                self.process_file(base_dir, &path, dest_base)?;
            }
        }

        Ok(())
    }

    fn process_file(&mut self, base_dir: &Path, file_path: &Path, dest_base: &Path) -> Result<()> {
        let relative = file_path
            .strip_prefix(base_dir)
            .map_err(|_| AssetError::InvalidPath(file_path.to_path_buf()))?;

        let dest_path = dest_base.join(relative);
        copy_file(file_path, &dest_path)?;

        self.copied
            .push(format!("/{}", relative.display()).replace('\\', "/"));

        debug!(
            src = %file_path.display(),
            dest = %dest_path.display(),
            "copied asset"
        );

        Ok(())
    }
}

/// Copy a single file, creating parent directories.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}
