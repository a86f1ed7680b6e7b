use crate::descriptor::ArchiveDescriptor;
use crate::domain::Outcome;

/// Hooks for reporting batch and search progress. Every method defaults to a
/// no-op so observers only implement what they display. Nothing here feeds
/// back into classification.
pub trait ProgressObserver: Send + Sync {
    /// Called before an archive is probed. `index` is zero-based.
    fn archive_started(&self, index: usize, total: usize, archive: &ArchiveDescriptor) {
        let _ = (index, total, archive);
    }

    /// Called once an archive has been found to be encrypted.
    fn search_started(&self, archive: &ArchiveDescriptor, candidates: usize) {
        let _ = (archive, candidates);
    }

    fn candidate_started(&self, index: usize, total: usize, candidate: &str) {
        let _ = (index, total, candidate);
    }

    fn archive_finished(&self, archive: &ArchiveDescriptor, outcome: &Outcome) {
        let _ = (archive, outcome);
    }
}

/// Observer that reports nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
