//! Fixed-interval refresh loop: fetch quotes, recompute rows, publish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use optviewer_core::{
    compute_display_rows, DisplaySink, FaultPolicy, MarketDataSource, Result, ViewerConfig,
    ViewerError,
};

use crate::session::Session;

/// Where the scheduler is in its tick cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Fetching,
    Publishing,
    Cancelled,
}

/// Drives the refresh loop over an immutable session.
///
/// One cycle per elapsed interval, never more than one in flight; rows
/// are published in strict tick order. Cancellation (the shutdown watch
/// flipping to `true`) stops the loop at the next await point, and an
/// in-flight fetch result is discarded rather than published.
pub struct RefreshScheduler {
    session: Session,
    source: Arc<dyn MarketDataSource>,
    sink: Arc<dyn DisplaySink>,
    config: ViewerConfig,
    state_tx: watch::Sender<SchedulerState>,
}

impl RefreshScheduler {
    #[must_use]
    pub fn new(
        session: Session,
        source: Arc<dyn MarketDataSource>,
        sink: Arc<dyn DisplaySink>,
        config: ViewerConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(SchedulerState::Idle);
        Self {
            session,
            source,
            sink,
            config,
            state_tx,
        }
    }

    /// Subscribes to scheduler state transitions.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<SchedulerState> {
        self.state_tx.subscribe()
    }

    /// Runs the loop until the shutdown signal turns `true` (or its
    /// sender is dropped, treated the same way).
    ///
    /// # Errors
    ///
    /// Under `FaultPolicy::SkipTick` tick failures are logged and the
    /// timer re-armed; under `FaultPolicy::Halt` the first tick error is
    /// returned.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.config.refresh_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Consume the immediate first tick so the first cycle runs one
        // full interval after start.
        interval.tick().await;

        info!(
            interval_ms = self.config.refresh_interval_ms,
            positions = self.session.records().len(),
            "Refresh scheduler started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.state_tx.send_replace(SchedulerState::Cancelled);
                        info!("Refresh scheduler cancelled");
                        return Ok(());
                    }
                }
                _ = interval.tick() => {
                    match self.run_tick(&mut shutdown).await {
                        Ok(true) => {
                            self.state_tx.send_replace(SchedulerState::Idle);
                        }
                        Ok(false) => {
                            // Cancelled mid-tick.
                            return Ok(());
                        }
                        Err(e) => match self.config.fault_policy {
                            FaultPolicy::SkipTick => {
                                error!(error = %e, "Tick failed; keeping last published rows");
                                self.state_tx.send_replace(SchedulerState::Idle);
                            }
                            FaultPolicy::Halt => {
                                error!(error = %e, "Tick failed; halting");
                                self.state_tx.send_replace(SchedulerState::Cancelled);
                                return Err(e);
                            }
                        },
                    }
                }
            }
        }
    }

    /// One fetch-and-publish cycle. Returns `Ok(false)` if cancellation
    /// interrupted it.
    async fn run_tick(&self, shutdown: &mut watch::Receiver<bool>) -> Result<bool> {
        self.state_tx.send_replace(SchedulerState::Fetching);
        let bound = Duration::from_secs(self.config.fetch_timeout_secs);

        let quotes = tokio::select! {
            fetched = tokio::time::timeout(bound, self.source.fetch_quotes(self.session.tickers())) => {
                match fetched {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(ViewerError::timeout(format!(
                            "quote fetch exceeded {}s",
                            self.config.fetch_timeout_secs
                        )))
                    }
                }
            }
            () = cancelled(shutdown) => {
                self.state_tx.send_replace(SchedulerState::Cancelled);
                return Ok(false);
            }
        };

        // A cancellation that raced the fetch wins: the result is dropped.
        if *shutdown.borrow() {
            self.state_tx.send_replace(SchedulerState::Cancelled);
            return Ok(false);
        }

        self.state_tx.send_replace(SchedulerState::Publishing);
        let rows = compute_display_rows(self.session.records(), &quotes)?;
        self.sink.publish(&rows).await?;
        debug!(rows = rows.len(), "Published tick");
        Ok(true)
    }
}

/// Resolves once the shutdown signal turns `true` or its sender is gone.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    while shutdown.changed().await.is_ok() {
        if *shutdown.borrow() {
            return;
        }
    }
}
