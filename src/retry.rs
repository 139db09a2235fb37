//! Retry and backoff for reading freshly uploaded files.
//!
//! An upload may still be landing on disk when conversion starts, so a
//! missing file is re-checked a few times with a linearly growing pause.

use std::io;
use std::time::Duration;

/// Default number of attempts before a missing file is reported.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff step: the pause before attempt `n` is `n * step`.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(100);

/// How often and how patiently to retry a missing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_step,
        }
    }

    /// Pause to take after failed attempt `attempt` (0-based).
    ///
    /// Linear: 0, step, 2*step, ... The first re-check happens at once.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }

    /// Run `op` until it succeeds, fails with anything other than
    /// `NotFound`, or attempts run out.
    ///
    /// Returns the last error together with the number of attempts made.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, (io::Error, u32)>
    where
        F: FnMut() -> io::Result<T>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.kind() == io::ErrorKind::NotFound && attempt + 1 < attempts => {
                    let delay = self.backoff_for(attempt);
                    log::debug!(
                        "attempt {}/{} found nothing, retrying in {:?}",
                        attempt + 1,
                        attempts,
                        delay
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err((e, attempt + 1)),
            }
        }
    }
}
