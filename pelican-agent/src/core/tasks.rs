//! Background poll task
//!
//! One periodic task drives the whole agent: fetch pending print jobs,
//! process them strictly in order, acknowledge each back to the feed.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::core::state::AppState;

/// Spawn the poll loop.
///
/// The first cycle runs immediately; afterwards the configured interval
/// drives it. Cancelling the token stops the task after any in-flight
/// cycle finishes, so dispatches are drained rather than cut off.
pub fn spawn_poller(state: AppState, shutdown: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_millis(state.config.poll_interval_ms);
        let mut interval = tokio::time::interval(period);
        // Long cycles must not cause catch-up bursts
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Poll task stopping");
                    break;
                }
                _ = interval.tick() => {
                    poll_cycle(&state).await;
                }
            }
        }
    })
}

/// One poll cycle.
#[instrument(skip(state))]
async fn poll_cycle(state: &AppState) {
    let jobs = match state.feed.fetch_pending().await {
        Ok(jobs) => jobs,
        Err(e) => {
            // Transient failure: the next tick tries again, no retry here
            warn!(error = %e, "Order feed poll failed");
            return;
        }
    };

    if jobs.count == 0 {
        return;
    }
    info!(count = jobs.count, "Pending orders found");

    for order in &jobs.orders {
        info!(order_id = order.id, name = %order.name, "Processing order");

        match state.service.process(order).await {
            Ok(processed) => {
                // Only acknowledged orders leave the feed; a failed
                // acknowledge means the job reappears next cycle
                match state.feed.mark_printed(order.id).await {
                    Ok(()) => info!(
                        order_id = order.id,
                        auto = processed.outcome.is_auto(),
                        "Order acknowledged"
                    ),
                    Err(e) => {
                        error!(order_id = order.id, error = %e, "Failed to acknowledge order")
                    }
                }
            }
            Err(e) => {
                error!(order_id = order.id, error = %e, "Label pipeline failed");
            }
        }

        // Throttle calls against the remote API between orders; dispatch
        // has already completed by this point
        tokio::time::sleep(Duration::from_millis(state.config.inter_order_delay_ms)).await;
    }
}
