//! Harness configuration.

use crate::error::HarnessError;
use std::time::Duration;

/// Lines between repeated tick headers.
pub const DEFAULT_HEADER_EVERY: usize = 20;

/// How a benchmark run is driven.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of concurrent workers.
    pub concurrency: usize,
    /// Stop after this long; `None` runs until interrupted.
    pub duration: Option<Duration>,
    /// Stop after this many operations in total.
    pub max_ops: Option<u64>,
    /// Reporting interval.
    pub tick: Duration,
    /// Repeat the tick header every this many lines.
    pub header_every: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            duration: None,
            max_ops: None,
            tick: Duration::from_secs(1),
            header_every: DEFAULT_HEADER_EVERY,
        }
    }
}

impl HarnessConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_max_ops(mut self, max_ops: Option<u64>) -> Self {
        self.max_ops = max_ops;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.concurrency == 0 {
            return Err(HarnessError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.tick.is_zero() {
            return Err(HarnessError::Config(
                "tick interval must be positive".to_string(),
            ));
        }
        if self.header_every == 0 {
            return Err(HarnessError::Config(
                "header interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Two workers per logical CPU.
pub fn default_concurrency() -> usize {
    2 * num_cpus::get()
}
