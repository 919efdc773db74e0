//! The benchmark run loop.
//!
//! Workers execute the workload back to back, each recording latencies into
//! its own histogram. The reporting loop wakes once per tick, merges the
//! worker histograms and prints a line. The run ends when the first
//! termination signal arrives: every worker finished (operation limit
//! reached), the duration elapsed, or the shutdown future resolved.

use crate::aggregator::{LatencyAggregator, Summary};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, WorkloadError};
use crate::histogram::WorkerLatency;
use crate::metrics::OpCounter;
use crate::report::Reporter;
use crate::workload::Workload;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Lifecycle of a [`Harness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    Idle,
    Running,
    Draining,
    Terminated,
}

/// Why the run loop stopped.
#[derive(Debug)]
enum Stop {
    Finished(&'static str),
    Failed { worker: usize, error: WorkloadError },
    Panicked(String),
}

pub struct Harness {
    config: HarnessConfig,
    state: HarnessState,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self {
            config,
            state: HarnessState::Idle,
        })
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    fn transition(&mut self, next: HarnessState) {
        debug!("Harness state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Drive `workload` until a termination signal, writing reports to `out`.
    ///
    /// A failed operation aborts the run: the error is returned and no
    /// summary is written.
    pub async fn run<W, S, O>(
        &mut self,
        workload: Arc<W>,
        shutdown: S,
        out: O,
    ) -> Result<Summary, HarnessError>
    where
        W: Workload + ?Sized + 'static,
        S: Future<Output = ()> + Send + 'static,
        O: Write,
    {
        if self.state != HarnessState::Idle {
            return Err(HarnessError::Config(
                "harness has already been run".to_string(),
            ));
        }

        let concurrency = self.config.concurrency;
        let start = Instant::now();
        let counter = Arc::new(OpCounter::new());
        let cancel = CancellationToken::new();
        let _cancel_on_exit = cancel.clone().drop_guard();
        let (stop_tx, mut stop_rx) = mpsc::channel::<Stop>(concurrency + 3);

        info!(
            "Starting {} workers (duration: {:?}, max ops: {:?})",
            concurrency, self.config.duration, self.config.max_ops
        );
        self.transition(HarnessState::Running);

        let mut latencies = Vec::with_capacity(concurrency);
        let mut workers = Vec::with_capacity(concurrency);
        for worker in 0..concurrency {
            let latency = Arc::new(WorkerLatency::new()?);
            latencies.push(Arc::clone(&latency));
            workers.push(tokio::spawn(run_worker(
                worker,
                Arc::clone(&workload),
                latency,
                Arc::clone(&counter),
                self.config.max_ops,
                cancel.clone(),
                stop_tx.clone(),
            )));
        }

        let mut signals = JoinSet::new();
        {
            let tx = stop_tx.clone();
            signals.spawn(async move {
                for handle in workers {
                    if let Err(e) = handle.await {
                        if e.is_panic() {
                            let _ = tx.send(Stop::Panicked(e.to_string())).await;
                            return;
                        }
                    }
                }
                let _ = tx.send(Stop::Finished("operation limit reached")).await;
            });
        }
        if let Some(duration) = self.config.duration {
            let tx = stop_tx.clone();
            signals.spawn(async move {
                tokio::time::sleep(duration).await;
                let _ = tx.send(Stop::Finished("duration elapsed")).await;
            });
        }
        {
            let tx = stop_tx.clone();
            signals.spawn(async move {
                shutdown.await;
                let _ = tx.send(Stop::Finished("shutdown requested")).await;
            });
        }
        drop(stop_tx);

        let mut aggregator = LatencyAggregator::new(latencies, start)?;
        let mut reporter = Reporter::new(out, self.config.header_every);
        let tick = self.config.tick;
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let stop = loop {
            tokio::select! {
                biased;
                stop = stop_rx.recv() => break stop,
                _ = ticker.tick() => {
                    let report = aggregator.tick(counter.completed())?;
                    reporter.write_tick(&report)?;
                }
            }
        };

        cancel.cancel();
        signals.abort_all();

        match stop {
            Some(Stop::Failed { worker, error }) => {
                error!("Worker {} failed: {}", worker, error);
                self.transition(HarnessState::Terminated);
                return Err(HarnessError::Workload {
                    worker,
                    source: error,
                });
            }
            Some(Stop::Panicked(message)) => {
                self.transition(HarnessState::Terminated);
                return Err(HarnessError::WorkerPanicked(message));
            }
            Some(Stop::Finished(reason)) => info!("Stopping: {}", reason),
            None => info!("Stopping: all signal sources closed"),
        }

        // In-flight operations are not awaited; late samples are dropped.
        // Drain before reading the counter so every summarized sample is counted.
        self.transition(HarnessState::Draining);
        aggregator.drain()?;
        let summary = aggregator.summarize(counter.completed());
        reporter.write_summary(&summary)?;
        info!(
            "Completed {} operations in {:.1}s ({:.1} ops/s)",
            summary.total_ops,
            summary.elapsed.as_secs_f64(),
            summary.ops_per_sec
        );
        self.transition(HarnessState::Terminated);
        Ok(summary)
    }
}

async fn run_worker<W: Workload + ?Sized>(
    worker: usize,
    workload: Arc<W>,
    latency: Arc<WorkerLatency>,
    counter: Arc<OpCounter>,
    max_ops: Option<u64>,
    cancel: CancellationToken,
    stop_tx: mpsc::Sender<Stop>,
) {
    loop {
        if cancel.is_cancelled() {
            break;
        }
        if let Some(max) = max_ops {
            if !counter.try_claim(max) {
                break;
            }
        }

        let started = Instant::now();
        if let Err(error) = workload.execute(worker).await {
            let _ = stop_tx.send(Stop::Failed { worker, error }).await;
            return;
        }
        let elapsed = started.elapsed();
        // Counted before recorded: a drained sample is always in the op total
        counter.complete();
        latency.record(elapsed);

        // Keep the reporting loop responsive under trivially fast workloads
        tokio::task::yield_now().await;
    }
    debug!("Worker {} stopped", worker);
}
