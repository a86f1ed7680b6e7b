#![forbid(unsafe_code)]

pub mod error;

pub mod cancel;
pub mod descriptor;
pub mod dictionary;
pub mod domain;
pub mod scratch;

pub mod backend;

pub mod executor;
pub mod probe;
pub mod search;

pub mod batch;
pub mod inputs;
pub mod progress;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports: stable API surface
pub use backend::{BackendResult, BackendSet, FormatBackend};
pub use batch::{BatchClassifier, ProbeTimeoutPolicy, RecoveryOptions};
pub use descriptor::ArchiveDescriptor;
pub use dictionary::Dictionary;
pub use domain::{BatchReport, BatchTally, Outcome};
pub use inputs::collect_inputs;
pub use progress::{NoProgress, ProgressObserver};
