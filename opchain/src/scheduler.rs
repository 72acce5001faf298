//! Periodic ingestion, decoupled from the query service.
//!
//! A scheduler owns a [`ScheduleConfig`]; [`IngestionScheduler::start`] spawns a
//! Tokio task that runs one pass immediately, then one pass per interval (plus
//! jitter) until stopped. Each pass visits the configured symbols in order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::OptionService;
use opchain_types::{OpchainError, ScheduleConfig, ScheduledRun};

/// Base delay plus a random share of up to `jitter_percent` of it.
fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}

/// Runs ingestion for a fixed set of symbols on an interval.
#[derive(Debug, Clone)]
pub struct IngestionScheduler {
    cfg: ScheduleConfig,
}

impl IngestionScheduler {
    /// Validate `cfg` and build a scheduler.
    ///
    /// Symbols are trimmed; blank ones are dropped.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no symbols remain, the interval is zero, or
    /// the jitter exceeds 100 %.
    pub fn new(mut cfg: ScheduleConfig) -> Result<Self, OpchainError> {
        cfg.symbols = cfg
            .symbols
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if cfg.symbols.is_empty() {
            return Err(OpchainError::InvalidArg(
                "schedule has no symbols to ingest".to_string(),
            ));
        }
        if cfg.interval.is_zero() {
            return Err(OpchainError::InvalidArg(
                "schedule interval must be positive".to_string(),
            ));
        }
        if cfg.jitter_percent > 100 {
            return Err(OpchainError::InvalidArg(format!(
                "jitter_percent must be within [0, 100], got {}",
                cfg.jitter_percent
            )));
        }
        Ok(Self { cfg })
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ScheduleConfig {
        &self.cfg
    }

    /// Run a single pass over every configured symbol.
    ///
    /// With `persist` set, each symbol is ingested (loaded and reconciled);
    /// otherwise it is loaded and the records are discarded.
    pub async fn run_once(&self, service: &OptionService) -> Vec<ScheduledRun> {
        let mut out = Vec::with_capacity(self.cfg.symbols.len());
        for symbol in &self.cfg.symbols {
            let run = if self.cfg.persist {
                match service.ingest(symbol).await {
                    Ok(report) => ScheduledRun::Persisted(report),
                    Err(error) => ScheduledRun::Failed {
                        symbol: symbol.clone(),
                        error,
                    },
                }
            } else {
                match service.try_load_options(symbol).await {
                    Ok(records) => ScheduledRun::Loaded {
                        symbol: symbol.clone(),
                        count: records.len(),
                    },
                    Err(error) => ScheduledRun::Failed {
                        symbol: symbol.clone(),
                        error,
                    },
                }
            };
            #[cfg(feature = "tracing")]
            if let ScheduledRun::Failed { symbol, error } = &run {
                tracing::warn!(target: "opchain::scheduler", %symbol, %error, "scheduled ingestion failed");
            }
            out.push(run);
        }
        out
    }

    /// Spawn the periodic task. Must be called within a Tokio runtime.
    #[must_use]
    pub fn start(self, service: Arc<OptionService>) -> SchedulerHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let (runs_tx, runs_rx) = watch::channel(Vec::new());
        let passes = Arc::new(AtomicU64::new(0));
        let passes_task = Arc::clone(&passes);
        let base_ms = u64::try_from(self.cfg.interval.as_millis()).unwrap_or(u64::MAX);
        let jitter = self.cfg.jitter_percent;

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    runs = self.run_once(&service) => {
                        passes_task.fetch_add(1, Ordering::SeqCst);
                        runs_tx.send_replace(runs);
                    }
                }
                let wait = Duration::from_millis(jitter_wait(base_ms, jitter));
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    () = tokio::time::sleep(wait) => {}
                }
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "opchain::scheduler", "scheduler stopped");
        });

        SchedulerHandle {
            join: Some(join),
            stop_tx: Some(stop_tx),
            runs: runs_rx,
            passes,
        }
    }
}

/// Handle to a running scheduler.
///
/// Dropping the handle sends a best-effort stop signal and aborts the task if it
/// is still running.
pub struct SchedulerHandle {
    join: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
    runs: watch::Receiver<Vec<ScheduledRun>>,
    passes: Arc<AtomicU64>,
}

impl SchedulerHandle {
    /// Number of completed passes.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::SeqCst)
    }

    /// Outcomes of the most recent completed pass (empty before the first).
    #[must_use]
    pub fn last_runs(&self) -> Vec<ScheduledRun> {
        self.runs.borrow().clone()
    }

    /// Receiver notified after every completed pass.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<ScheduledRun>> {
        self.runs.clone()
    }

    /// Request a graceful stop and wait for the task to exit.
    ///
    /// A pass in flight is abandoned at its next await point.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.join.take()
            && !h.is_finished()
        {
            h.abort();
        }
    }
}
