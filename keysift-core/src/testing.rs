//! Scriptable backend for engine tests.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::backend::{BackendResult, FormatBackend};
use crate::cancel::CancelFlag;
use crate::descriptor::ArchiveDescriptor;
use crate::error::{KeysiftError, Result};
use crate::scratch::ScratchRoot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    Now(BackendResult),
    /// Sleep until the attempt is cancelled.
    Block,
}

pub struct FakeBackend {
    name: &'static str,
    direct: Reply,
    accepts: Option<(String, Reply)>,
    otherwise: BackendResult,
    overrides: Vec<(String, BackendResult)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            direct: Reply::Now(BackendResult::FormatMismatch),
            accepts: None,
            otherwise: BackendResult::FormatMismatch,
            overrides: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn direct(mut self, reply: Reply) -> Self {
        self.direct = reply;
        self
    }

    /// Answer `reply` for `password`, `PasswordInvalid` for every other one.
    pub fn accepts(mut self, password: &str, reply: Reply) -> Self {
        self.accepts = Some((password.to_string(), reply));
        self.otherwise = BackendResult::PasswordInvalid;
        self
    }

    pub fn on(mut self, password: &str, result: BackendResult) -> Self {
        self.overrides.push((password.to_string(), result));
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn answer(reply: Reply, cancel: &CancelFlag) -> Result<BackendResult> {
        match reply {
            Reply::Now(r) => Ok(r),
            Reply::Block => {
                for _ in 0..2000 {
                    cancel.check()?;
                    std::thread::sleep(Duration::from_millis(5));
                }
                Err(KeysiftError::Worker("fake backend was never cancelled".into()))
            }
        }
    }
}

impl FormatBackend for FakeBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["fake"]
    }

    fn magic(&self) -> &'static [&'static [u8]] {
        &[b"FAKE"]
    }

    fn try_direct(&self, _: &ArchiveDescriptor, cancel: &CancelFlag) -> Result<BackendResult> {
        self.calls.lock().unwrap().push("<direct>".into());
        Self::answer(self.direct, cancel)
    }

    fn try_password(
        &self,
        _: &ArchiveDescriptor,
        password: &str,
        cancel: &CancelFlag,
    ) -> Result<BackendResult> {
        self.calls.lock().unwrap().push(password.to_string());
        if let Some((_, r)) = self.overrides.iter().find(|(p, _)| p == password) {
            return Ok(*r);
        }
        match &self.accepts {
            Some((p, reply)) if p == password => Self::answer(*reply, cancel),
            _ => Ok(self.otherwise),
        }
    }
}

/// A descriptor for a throwaway file under `dir`.
pub fn descriptor(dir: &Path, name: &str, bytes: &[u8]) -> Arc<ArchiveDescriptor> {
    let p = dir.join(name);
    std::fs::write(&p, bytes).unwrap();
    Arc::new(ArchiveDescriptor::open(&p, &ScratchRoot::new(dir.join("scratch"))).unwrap())
}

pub fn candidates(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
