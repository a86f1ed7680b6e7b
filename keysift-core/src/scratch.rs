use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_DIR_NAME: &str = "keysift";

/// Process-wide extraction root. Nothing is created on disk until the first
/// target directory is prepared.
#[derive(Clone, Debug)]
pub struct ScratchRoot {
    path: PathBuf,
}

impl ScratchRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Target directory for an archive stem. Two archives sharing a stem share
    /// a target; the later one overwrites.
    pub fn target_for(&self, stem: &str) -> PathBuf {
        self.path.join(stem)
    }

    /// Remove the whole root. A root that was never created is not an error.
    pub fn cleanup(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for ScratchRoot {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_DIR_NAME))
    }
}

/// Empty `dir`, creating it (and the scratch root) if needed.
pub fn reset_dir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}
