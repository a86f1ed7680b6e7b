// keysift_core/src/batch.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::backend::BackendSet;
use crate::descriptor::ArchiveDescriptor;
use crate::domain::{BatchReport, Outcome};
use crate::error::Result;
use crate::executor::{DEFAULT_ATTEMPT_TIMEOUT, TimeoutExecutor};
use crate::probe::{ProbeEngine, ProbeVerdict};
use crate::progress::ProgressObserver;
use crate::scratch::ScratchRoot;
use crate::search::DictionarySearch;

/// How a direct probe that outlives the bound is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProbeTimeoutPolicy {
    /// Slow direct extraction means nothing stood in the way: `NoPassword`.
    #[default]
    AssumeNoPassword,
    /// Keep the distinction visible as `Cancelled` (still counted as ok).
    Report,
}

#[derive(Clone, Debug)]
pub struct RecoveryOptions {
    /// Wall-clock bound for one attempt: a direct sweep or one candidate.
    pub attempt_timeout: Duration,
    pub scratch_root: PathBuf,
    pub probe_timeout: ProbeTimeoutPolicy,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            scratch_root: ScratchRoot::default().path().to_path_buf(),
            probe_timeout: ProbeTimeoutPolicy::default(),
        }
    }
}

/// Probes archives one at a time, searches the encrypted ones and tallies
/// the outcomes in input order.
pub struct BatchClassifier {
    options: RecoveryOptions,
    scratch: ScratchRoot,
    probe: ProbeEngine,
    search: DictionarySearch,
}

impl BatchClassifier {
    pub fn new(options: RecoveryOptions, backends: BackendSet) -> Self {
        let backends = Arc::new(backends);
        let executor = TimeoutExecutor::new(options.attempt_timeout);
        Self {
            scratch: ScratchRoot::new(options.scratch_root.clone()),
            probe: ProbeEngine::new(Arc::clone(&backends), executor),
            search: DictionarySearch::new(backends, executor),
            options,
        }
    }

    pub fn scratch(&self) -> &ScratchRoot {
        &self.scratch
    }

    /// Classify a single archive. Errors are returned as-is.
    pub async fn classify(
        &self,
        path: &Path,
        candidates: &[String],
        observer: &dyn ProgressObserver,
    ) -> Result<Outcome> {
        let archive = Arc::new(ArchiveDescriptor::open(path, &self.scratch)?);
        self.resolve(&archive, candidates, observer).await
    }

    async fn resolve(
        &self,
        archive: &Arc<ArchiveDescriptor>,
        candidates: &[String],
        observer: &dyn ProgressObserver,
    ) -> Result<Outcome> {
        let outcome = match self.probe.probe(archive).await? {
            ProbeVerdict::Unsupported => Outcome::Unsupported,
            ProbeVerdict::Corrupt => Outcome::Corrupt,
            ProbeVerdict::NoPassword { .. } => Outcome::NoPassword,
            ProbeVerdict::TimedOut => match self.options.probe_timeout {
                ProbeTimeoutPolicy::AssumeNoPassword => Outcome::NoPassword,
                ProbeTimeoutPolicy::Report => Outcome::Cancelled,
            },
            ProbeVerdict::Encrypted { backend } => {
                info!(file = %archive.file_name, backend, "archive is encrypted, searching dictionary");
                self.search.search(archive, candidates, observer).await?
            }
        };
        Ok(outcome)
    }

    /// Run every input through probe and search. Filesystem failures abort
    /// the batch; any other failure marks that archive `Corrupt`.
    pub async fn run(
        &self,
        inputs: &[PathBuf],
        candidates: &[String],
        observer: &dyn ProgressObserver,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for (index, path) in inputs.iter().enumerate() {
            let archive = Arc::new(ArchiveDescriptor::open(path, &self.scratch)?);
            observer.archive_started(index, inputs.len(), &archive);

            let outcome = match self.resolve(&archive, candidates, observer).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(file = %archive.file_name, error = %e, "classification failed, counting as corrupt");
                    Outcome::Corrupt
                }
            };

            info!(file = %archive.file_name, %outcome, "classified");
            observer.archive_finished(&archive, &outcome);
            report.record(archive.file_name.clone(), outcome);
        }
        Ok(report)
    }
}
