//! Merge worker histograms into per-tick and cumulative statistics.

use crate::error::HarnessError;
use crate::histogram::{latency_histogram, WorkerLatency};
use hdrhistogram::Histogram;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Statistics for one reporting interval.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Time since the run started.
    pub elapsed: Duration,
    /// Operations completed during this interval.
    pub ops: u64,
    /// Throughput over this interval.
    pub ops_per_sec: f64,
    /// Throughput since the run started.
    pub cumulative_ops_per_sec: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub max_ms: f64,
}

/// Final statistics for a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub elapsed: Duration,
    pub total_ops: u64,
    /// Latency samples in the cumulative histogram.
    pub samples: u64,
    pub ops_per_sec: f64,
    pub ns_per_op: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub max_ms: f64,
}

/// Collects worker latencies tick by tick.
pub struct LatencyAggregator {
    workers: Vec<Arc<WorkerLatency>>,
    cumulative: Histogram<u64>,
    start: Instant,
    last_tick: Instant,
    last_ops: u64,
}

impl LatencyAggregator {
    pub fn new(workers: Vec<Arc<WorkerLatency>>, start: Instant) -> Result<Self, HarnessError> {
        Ok(Self {
            workers,
            cumulative: latency_histogram()?,
            start,
            last_tick: start,
            last_ops: 0,
        })
    }

    /// Produce the report for the interval ending now.
    pub fn tick(&mut self, ops: u64) -> Result<TickReport, HarnessError> {
        self.tick_at(ops, Instant::now())
    }

    /// Produce the report for the interval ending at `now`.
    pub fn tick_at(&mut self, ops: u64, now: Instant) -> Result<TickReport, HarnessError> {
        let mut interval = latency_histogram()?;
        for worker in &self.workers {
            worker.merge_into(&mut interval)?;
        }
        self.merge(&interval)?;

        let tick_secs = now.saturating_duration_since(self.last_tick).as_secs_f64();
        let elapsed = now.saturating_duration_since(self.start);
        let tick_ops = ops.saturating_sub(self.last_ops);
        self.last_tick = now;
        self.last_ops = ops;

        Ok(TickReport {
            elapsed,
            ops: tick_ops,
            ops_per_sec: per_second(tick_ops, tick_secs),
            cumulative_ops_per_sec: per_second(ops, elapsed.as_secs_f64()),
            p50_ms: quantile_ms(&interval, 0.50),
            p95_ms: quantile_ms(&interval, 0.95),
            p99_ms: quantile_ms(&interval, 0.99),
            max_ms: quantile_ms(&interval, 1.0),
        })
    }

    /// Merge every sample the workers still hold into the cumulative histogram.
    pub fn drain(&mut self) -> Result<(), HarnessError> {
        for worker in &self.workers {
            worker.merge_into(&mut self.cumulative)?;
        }
        Ok(())
    }

    /// Summarize the whole run from the cumulative histogram.
    ///
    /// Samples still held by the workers are not included; call
    /// [`drain`](Self::drain) first, then read the op counter.
    pub fn summarize(&self, ops: u64) -> Summary {
        self.summarize_at(ops, Instant::now())
    }

    pub fn summarize_at(&self, ops: u64, now: Instant) -> Summary {
        let elapsed = now.saturating_duration_since(self.start);
        let h = &self.cumulative;
        let ns_per_op = if ops > 0 {
            elapsed.as_nanos() as f64 / ops as f64
        } else {
            0.0
        };

        Summary {
            elapsed,
            total_ops: ops,
            samples: h.len(),
            ops_per_sec: per_second(ops, elapsed.as_secs_f64()),
            ns_per_op,
            mean_ms: h.mean() / 1_000_000.0,
            p50_ms: quantile_ms(h, 0.50),
            p95_ms: quantile_ms(h, 0.95),
            p99_ms: quantile_ms(h, 0.99),
            max_ms: quantile_ms(h, 1.0),
        }
    }

    fn merge(&mut self, interval: &Histogram<u64>) -> Result<(), HarnessError> {
        self.cumulative
            .add(interval)
            .map_err(|e| HarnessError::Histogram(format!("{e:?}")))
    }
}

fn per_second(ops: u64, secs: f64) -> f64 {
    if secs > 0.0 {
        ops as f64 / secs
    } else {
        0.0
    }
}

fn quantile_ms(h: &Histogram<u64>, quantile: f64) -> f64 {
    if h.is_empty() {
        return 0.0;
    }
    h.value_at_quantile(quantile) as f64 / 1_000_000.0
}
