//! Per-worker latency histograms.
//!
//! Each worker records into its own [`WorkerLatency`]. The reporting loop
//! periodically rotates the worker's histogram out, swapping in a fresh one,
//! so samples are never counted twice and never lost.

use crate::error::HarnessError;
use hdrhistogram::Histogram;
use parking_lot::Mutex;
use std::time::Duration;

/// Smallest latency tracked at full precision.
pub const MIN_LATENCY: Duration = Duration::from_micros(1);

/// Largest latency tracked; larger samples are clamped.
pub const MAX_LATENCY: Duration = Duration::from_secs(60);

/// Significant decimal digits kept per bucket.
pub const SIGNIFICANT_FIGURES: u8 = 2;

/// Create an empty latency histogram in nanoseconds.
pub fn latency_histogram() -> Result<Histogram<u64>, HarnessError> {
    Histogram::new_with_bounds(
        MIN_LATENCY.as_nanos() as u64,
        MAX_LATENCY.as_nanos() as u64,
        SIGNIFICANT_FIGURES,
    )
    .map_err(|e| HarnessError::Histogram(format!("{e:?}")))
}

/// Latency samples for a single worker.
#[derive(Debug)]
pub struct WorkerLatency {
    current: Mutex<Histogram<u64>>,
    template: Histogram<u64>,
}

impl WorkerLatency {
    pub fn new() -> Result<Self, HarnessError> {
        let template = latency_histogram()?;
        Ok(Self {
            current: Mutex::new(template.clone()),
            template,
        })
    }

    /// Record one operation's latency.
    pub fn record(&self, latency: Duration) {
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.current.lock().saturating_record(nanos);
    }

    /// Take every sample recorded so far, leaving an empty histogram behind.
    pub fn rotate(&self) -> Histogram<u64> {
        // Allocated outside the lock; the lock covers only the swap
        let fresh = self.template.clone();
        std::mem::replace(&mut *self.current.lock(), fresh)
    }

    /// Rotate and add the taken samples to `target`.
    pub fn merge_into(&self, target: &mut Histogram<u64>) -> Result<(), HarnessError> {
        let taken = self.rotate();
        target
            .add(&taken)
            .map_err(|e| HarnessError::Histogram(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_rotate_takes_samples() {
        let latency = WorkerLatency::new().unwrap();
        latency.record(Duration::from_micros(150));
        latency.record(Duration::from_millis(3));

        let taken = latency.rotate();
        assert_eq!(taken.len(), 2);
        assert_eq!(latency.rotate().len(), 0);
    }

    #[test]
    fn test_oversized_sample_is_clamped() {
        let latency = WorkerLatency::new().unwrap();
        latency.record(Duration::from_secs(3600));
        let taken = latency.rotate();
        assert_eq!(taken.len(), 1);
        assert!(taken.max() <= taken.highest_equivalent(MAX_LATENCY.as_nanos() as u64));
    }

    #[test]
    fn test_rotate_then_merge_matches_direct_merge() {
        let samples = [5_000u64, 12_000, 80_000, 1_200_000, 9_000, 450_000, 31_000];

        let mut direct = latency_histogram().unwrap();
        for s in samples {
            direct.record(s).unwrap();
        }

        let latency = WorkerLatency::new().unwrap();
        let mut merged = latency_histogram().unwrap();
        for (i, s) in samples.iter().enumerate() {
            latency.record(Duration::from_nanos(*s));
            if i % 3 == 2 {
                latency.merge_into(&mut merged).unwrap();
            }
        }
        latency.merge_into(&mut merged).unwrap();

        assert_eq!(merged.len(), direct.len());
        for q in [0.5, 0.95, 0.99, 1.0] {
            assert_eq!(merged.value_at_quantile(q), direct.value_at_quantile(q));
        }
    }

    #[test]
    fn test_concurrent_record_and_rotate_loses_nothing() {
        const SAMPLES: u64 = 20_000;
        let latency = Arc::new(WorkerLatency::new().unwrap());
        let done = Arc::new(AtomicBool::new(false));

        let recorder = {
            let latency = Arc::clone(&latency);
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                for i in 0..SAMPLES {
                    latency.record(Duration::from_nanos(1_000 + i));
                }
                done.store(true, Ordering::Release);
            })
        };

        let mut rotated = 0;
        while !done.load(Ordering::Acquire) {
            rotated += latency.rotate().len();
        }
        recorder.join().unwrap();
        rotated += latency.rotate().len();

        assert_eq!(rotated, SAMPLES);
    }
}
