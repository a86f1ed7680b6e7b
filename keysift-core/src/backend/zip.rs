use std::fs::File;
use std::io::BufReader;

use ::zip::ZipArchive;
use ::zip::result::ZipError;

use super::copy::{CopyError, copy_cancellable, create_entry_file, entry_path};
use super::{BackendResult, FormatBackend};
use crate::cancel::CancelFlag;
use crate::descriptor::ArchiveDescriptor;
use crate::error::{KeysiftError, Result};

/// ZIP family: plain, ZipCrypto and WinZip AES entries.
pub struct ZipBackend;

type Zip = ZipArchive<BufReader<File>>;

fn open(archive: &ArchiveDescriptor) -> Result<Option<Zip>> {
    let file = File::open(&archive.path)?;
    // a truncated central directory is as foreign to us as a non-zip file
    Ok(ZipArchive::new(BufReader::new(file)).ok())
}

/// Extract every entry into the target. `rejected` is what a codec failure
/// means in this mode: format mismatch without a password, wrong key with
/// one.
fn extract_all(
    zip: &mut Zip,
    password: Option<&[u8]>,
    archive: &ArchiveDescriptor,
    cancel: &CancelFlag,
) -> Result<BackendResult> {
    let rejected = if password.is_some() {
        BackendResult::PasswordInvalid
    } else {
        BackendResult::FormatMismatch
    };

    for i in 0..zip.len() {
        cancel.check()?;
        let opened = match password {
            Some(pw) => zip.by_index_decrypt(i, pw),
            None => zip.by_index(i),
        };
        let mut entry = match opened {
            Ok(e) => e,
            Err(ZipError::InvalidPassword) => return Ok(BackendResult::PasswordInvalid),
            Err(_) => return Ok(rejected),
        };
        let Some(out) = entry
            .enclosed_name()
            .map(|rel| archive.target.join(rel))
            .or_else(|| entry_path(&archive.target, entry.name()))
        else {
            continue;
        };
        if entry.is_dir() {
            std::fs::create_dir_all(&out)?;
            continue;
        }
        let mut file = create_entry_file(&out)?;
        match copy_cancellable(&mut entry, &mut file, cancel) {
            Ok(_) => {}
            // CRC or HMAC mismatch after decryption
            Err(CopyError::Read(_)) => return Ok(rejected),
            Err(CopyError::Write(e)) => return Err(e.into()),
            Err(CopyError::Cancelled) => return Err(KeysiftError::Cancelled),
        }
    }
    Ok(BackendResult::Success)
}

impl FormatBackend for ZipBackend {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["zip", "zipx", "jar"]
    }

    fn magic(&self) -> &'static [&'static [u8]] {
        &[b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"]
    }

    fn try_direct(
        &self,
        archive: &ArchiveDescriptor,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        let Some(mut zip) = open(archive)? else {
            return Ok(BackendResult::FormatMismatch);
        };
        for i in 0..zip.len() {
            match zip.by_index_raw(i) {
                Ok(entry) if entry.encrypted() => return Ok(BackendResult::PasswordRequired),
                Ok(_) => {}
                Err(_) => return Ok(BackendResult::FormatMismatch),
            }
        }
        extract_all(&mut zip, None, archive, cancel)
    }

    fn try_password(
        &self,
        archive: &ArchiveDescriptor,
        password: &str,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        let Some(mut zip) = open(archive)? else {
            return Ok(BackendResult::FormatMismatch);
        };
        extract_all(&mut zip, Some(password.as_bytes()), archive, cancel)
    }
}
