use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeysiftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("not a file or directory: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("{backend} backend error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("attempt worker failed: {0}")]
    Worker(String),

    #[error("attempt cancelled")]
    Cancelled,
}

impl KeysiftError {
    /// Filesystem failures abort a batch; everything else is confined to the
    /// archive that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            KeysiftError::Io(_) | KeysiftError::Walk(_) | KeysiftError::InvalidInput(_)
        )
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, KeysiftError>;
