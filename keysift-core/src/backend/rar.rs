use unrar::error::{Code, UnrarError};
use unrar::{Archive, CursorBeforeHeader, OpenArchive, Process};

use super::{BackendResult, FormatBackend};
use crate::cancel::CancelFlag;
use crate::descriptor::ArchiveDescriptor;
use crate::error::{KeysiftError, Result};

/// RAR4 and RAR5 through the native unrar library.
pub struct RarBackend;

/// Map an unrar status code to a vote. Write-side codes are filesystem
/// failures and propagate.
fn classify(err: &UnrarError, password: Option<&str>) -> Result<BackendResult> {
    let with_password = password.is_some();
    match err.code {
        Code::MissingPassword => Ok(BackendResult::PasswordRequired),
        Code::BadPassword if with_password => Ok(BackendResult::PasswordInvalid),
        Code::BadPassword => Ok(BackendResult::PasswordRequired),
        // RAR4 has no password check value; a wrong key surfaces as a CRC failure
        Code::BadData if with_password => Ok(BackendResult::PasswordInvalid),
        Code::BadData | Code::BadArchive | Code::UnknownFormat | Code::EOpen => {
            Ok(BackendResult::FormatMismatch)
        }
        Code::ECreate | Code::EWrite => Err(KeysiftError::Io(std::io::Error::other(format!(
            "unrar could not write output: {err:?}"
        )))),
        // the library rejects some non-ASCII passwords outright
        Code::Unknown if password.is_some_and(|p| !p.is_ascii()) => {
            Ok(BackendResult::Indeterminate)
        }
        _ => Err(KeysiftError::Backend {
            backend: "rar",
            message: format!("{err:?}"),
        }),
    }
}

fn extract(
    opened: OpenArchive<Process, CursorBeforeHeader>,
    password: Option<&str>,
    archive: &ArchiveDescriptor,
    cancel: &CancelFlag,
) -> Result<BackendResult> {
    let mut cursor = opened;
    let mut entries = 0usize;
    loop {
        cancel.check()?;
        let header = match cursor.read_header() {
            Ok(Some(h)) => h,
            // a RAR cut off inside its headers also ends "cleanly"
            Ok(None) if entries == 0 => return Ok(BackendResult::FormatMismatch),
            Ok(None) => return Ok(BackendResult::Success),
            Err(e) => return classify(&e, password),
        };
        entries += 1;
        if password.is_none() && header.entry().is_encrypted() {
            return Ok(BackendResult::PasswordRequired);
        }
        cursor = match header.extract_with_base(&archive.target) {
            Ok(next) => next,
            Err(e) => return classify(&e, password),
        };
    }
}

impl FormatBackend for RarBackend {
    fn name(&self) -> &'static str {
        "rar"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["rar"]
    }

    fn magic(&self) -> &'static [&'static [u8]] {
        &[b"Rar!\x1a\x07"]
    }

    fn try_direct(
        &self,
        archive: &ArchiveDescriptor,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        match Archive::new(&archive.path).open_for_processing() {
            Ok(opened) => extract(opened, None, archive, cancel),
            Err(e) => classify(&e, None),
        }
    }

    fn try_password(
        &self,
        archive: &ArchiveDescriptor,
        password: &str,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        // passed to the library as a C string
        if password.contains('\0') {
            return Ok(BackendResult::Indeterminate);
        }
        match Archive::with_password(&archive.path, password.as_bytes()).open_for_processing() {
            Ok(opened) => extract(opened, Some(password), archive, cancel),
            Err(e) => classify(&e, Some(password)),
        }
    }
}
