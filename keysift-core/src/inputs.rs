use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{KeysiftError, Result};

/// Expand a CLI path into archive paths: a file is itself, a directory is
/// its direct child files sorted by name. Subdirectories are not entered.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    let md = std::fs::metadata(path)?;
    if md.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !md.is_dir() {
        return Err(KeysiftError::InvalidInput(path.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
