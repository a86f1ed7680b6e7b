//! Fixture archives for the integration tests.
//!
//! Each test file compiles as its own crate and uses a subset of these.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sevenz_rust::Password;
use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;
use zip::{AesMode, ZipWriter};

pub const PAYLOAD: &[u8] = b"quarterly numbers, do not forward\n";

pub enum Lock<'a> {
    None,
    Aes(&'a str),
    ZipCrypto(&'a str),
}

pub fn write_zip(dir: &Path, name: &str, lock: Lock<'_>) -> PathBuf {
    let path = dir.join(name);
    let mut w = ZipWriter::new(File::create(&path).unwrap());
    let base = SimpleFileOptions::default();
    match lock {
        Lock::None => w.start_file("report/data.txt", base),
        Lock::Aes(pw) => w.start_file(
            "report/data.txt",
            base.with_aes_encryption(AesMode::Aes256, pw),
        ),
        Lock::ZipCrypto(pw) => w.start_file(
            "report/data.txt",
            base.with_deprecated_encryption(pw.as_bytes()),
        ),
    }
    .unwrap();
    for _ in 0..64 {
        w.write_all(PAYLOAD).unwrap();
    }
    w.finish().unwrap();
    path
}

/// A plain zip cut in half: local header intact, central directory gone.
pub fn write_truncated_zip(dir: &Path, name: &str) -> PathBuf {
    let full = write_zip(dir, name, Lock::None);
    let bytes = std::fs::read(&full).unwrap();
    std::fs::write(&full, &bytes[..bytes.len() / 2]).unwrap();
    full
}

/// A one-file 7z archive, AES-encrypted when `password` is given.
pub fn write_7z(dir: &Path, name: &str, password: Option<&str>) -> PathBuf {
    let src = dir.join(format!("{name}.src"));
    std::fs::create_dir_all(&src).unwrap();
    let file = src.join("data.txt");
    std::fs::write(&file, PAYLOAD.repeat(64)).unwrap();

    let path = dir.join(name);
    match password {
        None => sevenz_rust::compress_to_path(&file, &path).unwrap(),
        Some(pw) => {
            sevenz_rust::compress_to_path_encrypted(&file, &path, Password::from(pw)).unwrap()
        }
    }
    std::fs::remove_dir_all(&src).unwrap();
    path
}

/// Copy a committed RAR fixture from `tests/data` into `dir`.
pub fn rar_fixture(dir: &Path, name: &str) -> PathBuf {
    let src = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    let path = dir.join(name);
    std::fs::copy(&src, &path).unwrap();
    path
}

/// Keep the first `keep` bytes of `path`, written under `name`.
pub fn truncated_copy(path: &Path, name: &str, keep: usize) -> PathBuf {
    let bytes = std::fs::read(path).unwrap();
    let out = path.with_file_name(name);
    std::fs::write(&out, &bytes[..keep.min(bytes.len())]).unwrap();
    out
}

/// Width-sorted list with `test123` fifth.
pub fn dictionary() -> Vec<String> {
    ["1234", "abcd", "admin", "qwerty", "test123", "password1"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
