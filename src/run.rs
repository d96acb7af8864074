//! Daemon execution logic.
//!
//! This module contains the main async loop that runs forkdns
//! reconciliation passes until a shutdown signal arrives.

use std::error::Error as _;
use std::future::Future;

use thiserror::Error;
use tokio::signal;
use tokio_stream::{Stream, StreamExt};

use netstate::config::ValidatedConfig;
use netstate::forkdns::{
    FileHeartbeatSource, ForkdnsReconciler, PassReport, ReconcileError, ReconcileStream,
    ServersFileLoader,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Unexpected stream termination.
    #[error("Reconcile stream terminated unexpectedly")]
    StreamTerminated,
}

/// Executes the reconciliation daemon.
///
/// This function:
/// 1. Builds the catalog from the configured networks
/// 2. Creates the server list loader and heartbeat source
/// 3. Runs a pass every `reconcile_interval` until shutdown (Ctrl+C / SIGTERM)
///
/// A failed pass is logged and retried on the next tick.
///
/// # Errors
///
/// Returns an error if the reconcile stream terminates unexpectedly.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let catalog = config.catalog();

    let mut loader = ServersFileLoader::new(catalog.clone(), config.state_dir.clone());
    if let Some(address) = config.local_address.clone() {
        loader = loader.with_local_address(address);
    }

    let reconciler = ForkdnsReconciler::new(catalog, loader);
    let heartbeat = FileHeartbeatSource::new(config.heartbeat_file.clone());

    tracing::info!(
        "Forkdns reconciliation every {}s (heartbeat: {})",
        config.reconcile_interval.as_secs(),
        heartbeat.path().display()
    );

    let stream = ReconcileStream::new(reconciler, heartbeat, config.reconcile_interval);
    run_loop(stream, shutdown_signal()).await
}

/// Drains pass results until `shutdown` completes.
async fn run_loop<S, F>(mut stream: S, shutdown: F) -> Result<(), RunError>
where
    S: Stream<Item = Result<PassReport, ReconcileError>> + Unpin,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            result = stream.next() => {
                match result {
                    Some(Ok(report)) => log_report(&report),
                    Some(Err(e)) => {
                        tracing::error!("Forkdns reconciliation failed: {}", describe_failure(&e));
                    }
                    None => {
                        // Stream ended unexpectedly
                        return Err(RunError::StreamTerminated);
                    }
                }
            }
        }
    }
}

/// Formats a failed pass as its step plus the direct cause.
fn describe_failure(error: &ReconcileError) -> String {
    match error.source() {
        Some(cause) => format!("{error}: {cause}"),
        None => error.to_string(),
    }
}

fn log_report(report: &PassReport) {
    if report.refreshed.is_empty() {
        tracing::debug!(
            "Forkdns pass visited {} network(s), none fan-mode",
            report.visited
        );
    } else {
        tracing::debug!(
            "Forkdns pass visited {} network(s), refreshed {}",
            report.visited,
            report.refreshed.join(", ")
        );
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal source is ignored and the
/// other one still ends the daemon.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
