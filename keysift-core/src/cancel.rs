use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{KeysiftError, Result};

/// One-way cancellation signal shared between the executor and the attempt
/// it is timing. Backends poll it between entries and copy blocks.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(KeysiftError::Cancelled)
        } else {
            Ok(())
        }
    }
}
