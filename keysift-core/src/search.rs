use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::{BackendSet, Sweep};
use crate::descriptor::ArchiveDescriptor;
use crate::domain::Outcome;
use crate::error::Result;
use crate::executor::{Attempt, TimeoutExecutor};
use crate::progress::ProgressObserver;

/// Ordered dictionary attack on one encrypted archive.
pub struct DictionarySearch {
    backends: Arc<BackendSet>,
    executor: TimeoutExecutor,
}

impl DictionarySearch {
    pub fn new(backends: Arc<BackendSet>, executor: TimeoutExecutor) -> Self {
        Self { backends, executor }
    }

    /// Try each candidate in order and stop at the first one that opens the
    /// archive or keeps a backend busy past the time bound.
    pub async fn search(
        &self,
        archive: &Arc<ArchiveDescriptor>,
        candidates: &[String],
        observer: &dyn ProgressObserver,
    ) -> Result<Outcome> {
        let total = candidates.len();
        observer.search_started(archive, total);

        for (index, candidate) in candidates.iter().enumerate() {
            observer.candidate_started(index, total, candidate);

            let backends = Arc::clone(&self.backends);
            let target = Arc::clone(archive);
            let password = candidate.clone();
            let attempt = self
                .executor
                .run(move |cancel| backends.sweep_password(&target, &password, cancel))
                .await?;

            match attempt {
                Attempt::Finished(Sweep::Extracted { backend }) => {
                    info!(file = %archive.file_name, backend, index, "password accepted");
                    return Ok(Outcome::Found(candidate.clone()));
                }
                Attempt::TimedOut => {
                    info!(file = %archive.file_name, index, "attempt timed out, taking candidate");
                    return Ok(Outcome::FoundByTimeout(candidate.clone()));
                }
                Attempt::Finished(_) => {
                    debug!(file = %archive.file_name, index, "candidate rejected");
                }
            }
        }
        Ok(Outcome::Exhausted)
    }
}
