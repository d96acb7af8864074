//! Periodic reconciliation stream.
//!
//! [`ReconcileStream`] ticks on a fixed interval, fetches the latest
//! heartbeat snapshot, and runs one pass per tick. The pass runs to
//! completion inside `poll_next`, so two passes can never overlap; a pass
//! that overruns its interval delays the following tick instead.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::Stream;

use crate::catalog::NetworkCatalog;

use super::{ForkdnsReconciler, HeartbeatSource, NetworkLoader, PassReport, ReconcileError};

/// A stream of reconciliation pass results.
///
/// Yields one item per tick that had a heartbeat snapshot available. Ticks
/// without a snapshot are skipped silently. The stream never terminates on
/// its own.
pub struct ReconcileStream<C, L, H> {
    reconciler: ForkdnsReconciler<C, L>,
    heartbeat: H,
    interval: Interval,
}

impl<C, L, H> ReconcileStream<C, L, H>
where
    C: NetworkCatalog,
    L: NetworkLoader,
    H: HeartbeatSource,
{
    /// Creates a stream that runs a pass every `period`, starting immediately.
    #[must_use]
    pub fn new(reconciler: ForkdnsReconciler<C, L>, heartbeat: H, period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            reconciler,
            heartbeat,
            interval,
        }
    }

    /// Fetches the heartbeat and runs a pass, or returns `None` if there is
    /// no heartbeat yet.
    fn tick_once(&self) -> Option<Result<PassReport, ReconcileError>> {
        match self.heartbeat.latest() {
            Ok(Some(snapshot)) => Some(self.reconciler.run_pass(&snapshot)),
            Ok(None) => {
                tracing::debug!("No heartbeat snapshot yet, skipping forkdns pass");
                None
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

impl<C, L, H> Stream for ReconcileStream<C, L, H>
where
    C: NetworkCatalog + Unpin,
    L: NetworkLoader + Unpin,
    H: HeartbeatSource + Unpin,
{
    type Item = Result<PassReport, ReconcileError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if Pin::new(&mut self.interval).poll_tick(cx).is_pending() {
                return Poll::Pending;
            }

            if let Some(result) = self.tick_once() {
                return Poll::Ready(Some(result));
            }
            // No heartbeat - loop back to re-register waker via poll_tick
        }
    }
}
