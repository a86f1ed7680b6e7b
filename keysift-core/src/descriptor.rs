use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::Result;
use crate::scratch::{ScratchRoot, reset_dir};

/// Bytes kept from the start of the file for signature checks.
pub const MAGIC_LEN: usize = 8;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Metadata snapshot of one input file, taken once and never updated.
#[derive(Clone, Debug)]
pub struct ArchiveDescriptor {
    pub path: PathBuf,
    pub file_name: String,
    pub stem: String,
    /// Lowercased extension as written in the file name, without the dot.
    pub extension: Option<String>,
    pub size_bytes: u64,
    pub modified: OffsetDateTime,
    pub magic: Vec<u8>,
    pub target: PathBuf,
}

impl ArchiveDescriptor {
    pub fn open(path: &Path, scratch: &ScratchRoot) -> Result<Self> {
        let path = std::fs::canonicalize(path)?;
        let md = std::fs::metadata(&path)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        let modified = md
            .modified()
            .map(OffsetDateTime::from)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);

        let mut magic = Vec::with_capacity(MAGIC_LEN);
        File::open(&path)?
            .take(MAGIC_LEN as u64)
            .read_to_end(&mut magic)?;

        let target = scratch.target_for(&stem);
        Ok(Self {
            path,
            file_name,
            stem,
            extension,
            size_bytes: md.len(),
            modified,
            magic,
            target,
        })
    }

    /// Size in megabytes, rounded to two decimals.
    pub fn size_mb(&self) -> f64 {
        (self.size_bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
    }

    pub fn has_extension(&self, candidates: &[&str]) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| candidates.contains(&ext))
    }

    /// Empty the target directory before an extraction attempt.
    pub fn prepare_target(&self) -> Result<()> {
        reset_dir(&self.target)
    }

    /// Human-readable metadata lines: name, path, size and modification time.
    pub fn describe(&self) -> Vec<String> {
        let stamp = self
            .modified
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| self.modified.to_string());
        vec![
            format!("name:     {}", self.file_name),
            format!("path:     {}", self.path.display()),
            format!("size:     {} MB", self.size_mb()),
            format!("modified: {stamp}"),
        ]
    }
}
