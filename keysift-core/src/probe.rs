use std::sync::Arc;

use tracing::debug;

use crate::backend::{BackendSet, Sweep};
use crate::descriptor::ArchiveDescriptor;
use crate::error::Result;
use crate::executor::{Attempt, TimeoutExecutor};

/// What a direct, password-less attempt says about an archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// No backend claims the file by extension or signature.
    Unsupported,
    /// Claimed, but every backend failed to parse it.
    Corrupt,
    NoPassword { backend: &'static str },
    Encrypted { backend: &'static str },
    /// The direct attempt outlived the time bound.
    TimedOut,
}

pub struct ProbeEngine {
    backends: Arc<BackendSet>,
    executor: TimeoutExecutor,
}

impl ProbeEngine {
    pub fn new(backends: Arc<BackendSet>, executor: TimeoutExecutor) -> Self {
        Self { backends, executor }
    }

    pub async fn probe(&self, archive: &Arc<ArchiveDescriptor>) -> Result<ProbeVerdict> {
        if !self.backends.recognizes(archive) {
            debug!(file = %archive.file_name, "no backend recognizes this file");
            return Ok(ProbeVerdict::Unsupported);
        }

        let backends = Arc::clone(&self.backends);
        let target = Arc::clone(archive);
        let attempt = self
            .executor
            .run(move |cancel| backends.sweep_direct(&target, cancel))
            .await?;

        let verdict = match attempt {
            Attempt::Finished(Sweep::Extracted { backend }) => ProbeVerdict::NoPassword { backend },
            Attempt::Finished(Sweep::Encrypted { backend }) => ProbeVerdict::Encrypted { backend },
            Attempt::Finished(Sweep::Rejected) => ProbeVerdict::Corrupt,
            Attempt::TimedOut => ProbeVerdict::TimedOut,
        };
        debug!(file = %archive.file_name, ?verdict, "probe finished");
        Ok(verdict)
    }
}
