//! Wall-clock bound for a single extraction attempt.
//!
//! The attempt runs on tokio's blocking pool and is raced against a timer.
//! When the timer wins, the attempt's [`CancelFlag`] is raised and its join
//! handle dropped; the worker winds down on its own and anything it already
//! wrote stays where it is.

use std::time::Duration;

use tokio::task;
use tokio::time;

use crate::cancel::CancelFlag;
use crate::error::{KeysiftError, Result};

pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempt<T> {
    Finished(T),
    TimedOut,
}

#[derive(Clone, Copy, Debug)]
pub struct TimeoutExecutor {
    bound: Duration,
}

impl Default for TimeoutExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPT_TIMEOUT)
    }
}

impl TimeoutExecutor {
    pub fn new(bound: Duration) -> Self {
        Self { bound }
    }

    /// Run `attempt` once. A timed-out attempt is never retried.
    pub async fn run<T, F>(&self, attempt: F) -> Result<Attempt<T>>
    where
        T: Send + 'static,
        F: FnOnce(&CancelFlag) -> Result<T> + Send + 'static,
    {
        let cancel = CancelFlag::new();
        let worker_flag = cancel.clone();
        let mut handle = task::spawn_blocking(move || attempt(&worker_flag));

        tokio::select! {
            biased;
            joined = &mut handle => match joined {
                Ok(result) => result.map(Attempt::Finished),
                Err(e) => Err(KeysiftError::Worker(e.to_string())),
            },
            _ = time::sleep(self.bound) => {
                cancel.cancel();
                drop(handle);
                tracing::debug!(bound = ?self.bound, "attempt timed out, worker detached");
                Ok(Attempt::TimedOut)
            }
        }
    }
}
