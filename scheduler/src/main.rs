//! Main entry point for the scheduler binary
//!
//! Wires the production services into the sweep engine with proper
//! dependency injection and runs the periodic trigger until Ctrl+C.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;

use scheduler::services::{HttpNotificationGateway, MemoryStore, SimulatedFilingClient};
use scheduler::{Notifier, SchedulerResult, SubmissionProcessor, SweepRunner, SweepScheduler};
use shared::logging;

/// Submission scheduler for the arrival-card filing service
#[derive(Parser)]
#[command(name = "scheduler")]
#[command(about = "Discovers due itineraries and files arrival cards at their scheduled instant")]
pub struct Args {
    /// Sweep cadence in seconds
    #[arg(long, default_value = "3600")]
    pub sweep_interval_secs: u64,

    /// Upper bound on one filing call in seconds
    #[arg(long, default_value = "30")]
    pub filing_timeout_secs: u64,

    /// Artificial latency of the simulated filing call in milliseconds
    #[arg(long, default_value = "2000")]
    pub filing_latency_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// JSON seed file with users, itineraries and submissions
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Write a JSON snapshot of the store here after every sweep
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Webhook endpoint for email delivery (log-only when unset)
    #[arg(long)]
    pub email_endpoint: Option<String>,

    /// Webhook endpoint for messaging delivery (log-only when unset)
    #[arg(long)]
    pub messaging_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> SchedulerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));
    logging::log_startup("submission scheduler");

    // Initialize services
    let store = Arc::new(match &args.seed {
        Some(path) => MemoryStore::from_seed_file(path).await?,
        None => MemoryStore::new(),
    });
    let gateway = Arc::new(HttpNotificationGateway::new(
        args.email_endpoint.clone(),
        args.messaging_endpoint.clone(),
    ));
    let filing = Arc::new(SimulatedFilingClient::new(Duration::from_millis(
        args.filing_latency_ms,
    )));

    // Assemble the engine with dependency injection
    let notifier = Notifier::new(Arc::clone(&store), Arc::clone(&store), gateway);
    let processor = SubmissionProcessor::new(
        Arc::clone(&store),
        filing,
        notifier.clone(),
        Duration::from_secs(args.filing_timeout_secs),
    );
    let runner = SweepRunner::new(Arc::clone(&store), processor, notifier);

    let sched = SweepScheduler::new(runner, Duration::from_secs(args.sweep_interval_secs));
    let handle = sched.handle();

    // Set up graceful shutdown
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown("received Ctrl+C signal");
                handle.shutdown().await;
            }
            Err(err) => {
                logging::log_error("signal handling", &err);
            }
        }
    });

    // Periodically snapshot the store for inspection
    if let Some(path) = args.snapshot.clone() {
        let store = Arc::clone(&store);
        let cadence = Duration::from_secs(args.sweep_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cadence);
            loop {
                ticker.tick().await;
                if let Err(err) = store.write_snapshot(&path).await {
                    logging::log_error("store snapshot", &err);
                }
            }
        });
    }

    sched.run().await;

    logging::log_success("Scheduler stopped gracefully");
    Ok(())
}
