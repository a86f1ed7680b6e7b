use std::fs::File;
use std::io::BufReader;

use sevenz_rust::{Error as SevenZError, Password, SevenZReader};
use tracing::debug;

use super::copy::{CopyError, copy_cancellable, create_entry_file, entry_path};
use super::{BackendResult, FormatBackend};
use crate::cancel::CancelFlag;
use crate::descriptor::ArchiveDescriptor;
use crate::error::{KeysiftError, Result};

pub struct SevenZBackend;

fn verdict(err: &SevenZError, with_password: bool) -> BackendResult {
    match err {
        SevenZError::BadSignature(_) => BackendResult::FormatMismatch,
        SevenZError::PasswordRequired => BackendResult::PasswordRequired,
        // garbage from a wrong key fails the header parse, the decoder or the CRC
        _ if with_password => BackendResult::PasswordInvalid,
        _ => BackendResult::FormatMismatch,
    }
}

fn extract(
    archive: &ArchiveDescriptor,
    password: Password,
    with_password: bool,
    cancel: &CancelFlag,
) -> Result<BackendResult> {
    let file = File::open(&archive.path)?;
    let len = file.metadata()?.len();
    let mut reader = match SevenZReader::new(BufReader::new(file), len, password) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, file = %archive.file_name, "7z open failed");
            return Ok(verdict(&e, with_password));
        }
    };

    // failures that are ours, not the codec's, smuggled out of the callback
    let mut write_error: Option<std::io::Error> = None;
    let mut cancelled = false;

    let walked = reader.for_each_entries(|entry, data| {
        let Some(out) = entry_path(&archive.target, entry.name()) else {
            return Ok(true);
        };
        if entry.is_directory() {
            if let Err(e) = std::fs::create_dir_all(&out) {
                write_error = Some(e);
                return Ok(false);
            }
            return Ok(true);
        }
        let mut file = match create_entry_file(&out) {
            Ok(f) => f,
            Err(e) => {
                write_error = Some(e);
                return Ok(false);
            }
        };
        match copy_cancellable(data, &mut file, cancel) {
            Ok(_) => Ok(true),
            Err(CopyError::Read(e)) => Err(e.into()),
            Err(CopyError::Write(e)) => {
                write_error = Some(e);
                Ok(false)
            }
            Err(CopyError::Cancelled) => {
                cancelled = true;
                Ok(false)
            }
        }
    });

    if cancelled {
        return Err(KeysiftError::Cancelled);
    }
    if let Some(e) = write_error {
        return Err(e.into());
    }
    match walked {
        Ok(()) => Ok(BackendResult::Success),
        Err(e) => {
            debug!(error = %e, file = %archive.file_name, "7z decode failed");
            Ok(verdict(&e, with_password))
        }
    }
}

impl FormatBackend for SevenZBackend {
    fn name(&self) -> &'static str {
        "7z"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["7z"]
    }

    fn magic(&self) -> &'static [&'static [u8]] {
        &[b"7z\xbc\xaf\x27\x1c"]
    }

    fn try_direct(
        &self,
        archive: &ArchiveDescriptor,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        extract(archive, Password::empty(), false, cancel)
    }

    fn try_password(
        &self,
        archive: &ArchiveDescriptor,
        password: &str,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        extract(archive, Password::from(password), true, cancel)
    }
}
