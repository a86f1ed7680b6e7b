//! Archive container backends.
//!
//! Every backend answers the same two questions, "does this open without a
//! password?" and "does this password open it?", and reports the answer as
//! a [`BackendResult`] instead of leaking its codec's error types. The
//! [`BackendSet`] runs them in a fixed order; the container format is
//! whatever parses, not whatever the extension claims.

use tracing::debug;

use crate::cancel::CancelFlag;
use crate::descriptor::ArchiveDescriptor;
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BackendResult {
    Success,
    FormatMismatch,
    PasswordRequired,
    PasswordInvalid,
    /// The backend cannot vote on this attempt; its answer is discarded.
    Indeterminate,
}

pub trait FormatBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn extensions(&self) -> &'static [&'static str];

    fn magic(&self) -> &'static [&'static [u8]];

    fn try_direct(&self, archive: &ArchiveDescriptor, cancel: &CancelFlag)
    -> Result<BackendResult>;

    fn try_password(
        &self,
        archive: &ArchiveDescriptor,
        password: &str,
        cancel: &CancelFlag,
    ) -> Result<BackendResult>;

    /// Claimed by extension or by leading magic bytes.
    fn recognizes(&self, archive: &ArchiveDescriptor) -> bool {
        archive.has_extension(self.extensions())
            || self.magic().iter().any(|m| archive.magic.starts_with(m))
    }
}

/// Combined verdict of one pass over the backend set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sweep {
    Extracted { backend: &'static str },
    Encrypted { backend: &'static str },
    Rejected,
}

pub struct BackendSet {
    backends: Vec<Box<dyn FormatBackend>>,
}

impl BackendSet {
    pub fn new(backends: Vec<Box<dyn FormatBackend>>) -> Self {
        Self { backends }
    }

    /// ZIP, RAR, 7z, in that order.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(zip::ZipBackend),
            Box::new(rar::RarBackend),
            Box::new(sevenz::SevenZBackend),
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn recognizes(&self, archive: &ArchiveDescriptor) -> bool {
        self.backends.iter().any(|b| b.recognizes(archive))
    }

    pub fn sweep_direct(&self, archive: &ArchiveDescriptor, cancel: &CancelFlag) -> Result<Sweep> {
        for backend in &self.backends {
            cancel.check()?;
            archive.prepare_target()?;
            let result = backend.try_direct(archive, cancel)?;
            debug!(backend = backend.name(), ?result, file = %archive.file_name, "direct attempt");
            match result {
                BackendResult::Success => {
                    return Ok(Sweep::Extracted {
                        backend: backend.name(),
                    });
                }
                BackendResult::PasswordRequired | BackendResult::PasswordInvalid => {
                    return Ok(Sweep::Encrypted {
                        backend: backend.name(),
                    });
                }
                BackendResult::FormatMismatch | BackendResult::Indeterminate => {}
            }
        }
        Ok(Sweep::Rejected)
    }

    pub fn sweep_password(
        &self,
        archive: &ArchiveDescriptor,
        password: &str,
        cancel: &CancelFlag,
    ) -> Result<Sweep> {
        for backend in &self.backends {
            cancel.check()?;
            archive.prepare_target()?;
            let result = backend.try_password(archive, password, cancel)?;
            match result {
                BackendResult::Success => {
                    return Ok(Sweep::Extracted {
                        backend: backend.name(),
                    });
                }
                BackendResult::Indeterminate => {
                    debug!(backend = backend.name(), "vote discarded for this candidate");
                }
                _ => {}
            }
        }
        Ok(Sweep::Rejected)
    }
}

pub mod copy;
pub mod rar;
pub mod sevenz;
pub mod zip;
