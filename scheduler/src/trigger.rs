//! Periodic sweep trigger
//!
//! An owned scheduler loop instead of a free-floating process-wide timer:
//! construct it with the sweep runner and a cadence, run it, stop it. The
//! loop selects over interval ticks, manual trigger requests, and the
//! shutdown channel. Sweeps execute inline on the loop task, so a second
//! sweep can never start while one is in flight; missed ticks are skipped,
//! not replayed, because eligibility is a query over current time.

use std::time::Duration;

use chrono::Utc;
use shared::logging;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::sweep::{SweepReport, SweepRunner};
use crate::traits::{FilingClient, NotificationGateway, StateStore, UserDirectory};

enum Command {
    RunNow(oneshot::Sender<SweepReport>),
}

/// Cloneable handle for manual invocation and shutdown
#[derive(Clone)]
pub struct SchedulerHandle {
    command_tx: mpsc::Sender<Command>,
    shutdown_tx: mpsc::Sender<()>,
}

impl SchedulerHandle {
    /// Trigger a sweep outside the cadence and wait for its report
    ///
    /// A request arriving mid-sweep is deferred until that sweep finishes.
    /// Returns `None` if the scheduler loop has already stopped.
    pub async fn run_now(&self) -> Option<SweepReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx.send(Command::RunNow(reply_tx)).await.ok()?;
        reply_rx.await.ok()
    }

    /// Stop the scheduler loop after the current sweep, if any
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Owns the periodic sweep lifecycle
pub struct SweepScheduler<S, D, G, F>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
    F: FilingClient + Send + Sync + 'static,
{
    runner: SweepRunner<S, D, G, F>,
    cadence: Duration,
    command_tx: mpsc::Sender<Command>,
    command_rx: mpsc::Receiver<Command>,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<S, D, G, F> SweepScheduler<S, D, G, F>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
    F: FilingClient + Send + Sync + 'static,
{
    pub fn new(runner: SweepRunner<S, D, G, F>, cadence: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            runner,
            cadence,
            command_tx,
            command_rx,
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            command_tx: self.command_tx.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }

    /// Run until shutdown
    ///
    /// The first sweep fires immediately, then once per cadence.
    pub async fn run(mut self) {
        info!("⏰ Sweep scheduler running every {}s", self.cadence.as_secs());

        let mut ticker = interval(self.cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    info!("🕐 Running scheduled submission check");
                    self.execute().await;
                }
                Some(command) = self.command_rx.recv() => {
                    match command {
                        Command::RunNow(reply) => {
                            info!("🕐 Running manually triggered submission check");
                            let report = self.execute().await;
                            let _ = reply.send(report);
                        }
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    logging::log_shutdown("sweep scheduler stopped");
                    break;
                }
            }
        }
    }

    async fn execute(&self) -> SweepReport {
        let now = Utc::now();
        let report = self.runner.run_sweep(now).await;
        self.runner.run_reminder_pass(now).await;
        report
    }
}
