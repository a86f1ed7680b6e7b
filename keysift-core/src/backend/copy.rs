use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use crate::cancel::CancelFlag;

const BLOCK: usize = 64 * 1024;

/// Which side of a copy failed. Read errors come from the codec and carry
/// the wrong-password / corrupt-data signal; write errors are filesystem
/// failures.
#[derive(Debug)]
pub enum CopyError {
    Read(io::Error),
    Write(io::Error),
    Cancelled,
}

pub fn copy_cancellable(
    src: &mut dyn Read,
    dst: &mut dyn Write,
    cancel: &CancelFlag,
) -> std::result::Result<u64, CopyError> {
    let mut buf = vec![0u8; BLOCK];
    let mut total = 0u64;
    loop {
        if cancel.is_cancelled() {
            return Err(CopyError::Cancelled);
        }
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        dst.write_all(&buf[..n]).map_err(CopyError::Write)?;
        total += n as u64;
    }
    dst.flush().map_err(CopyError::Write)?;
    Ok(total)
}

/// Keep only normal components of an entry name so nothing lands outside
/// `root`. None when nothing is left.
pub fn entry_path(root: &Path, name: &str) -> Option<PathBuf> {
    let mut rel = PathBuf::new();
    for component in Path::new(&name.replace('\\', "/")).components() {
        if let Component::Normal(part) = component {
            rel.push(part);
        }
    }
    if rel.as_os_str().is_empty() {
        None
    } else {
        Some(root.join(rel))
    }
}

/// Create the output file for an entry, including missing parent dirs.
pub fn create_entry_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}
