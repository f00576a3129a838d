//! Background session loop with fixed-delay auto-reconnect.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::gateway::handler::{handle_frame, FrameAction};
use crate::gateway::heartbeat::HeartbeatScheduler;
use crate::gateway::ConnectionState;
use crate::presence::SnapshotStore;
use crate::protocol::encode_subscribe;
use crate::transport::{Transport, TransportEvent, TransportFactory};
use crate::PresenceError;

/// Everything one session owns; moved into the background task.
pub(crate) struct SessionContext {
    pub(crate) identity: String,
    pub(crate) reconnect_delay: Duration,
    pub(crate) factory: Arc<dyn TransportFactory>,
    pub(crate) store: SnapshotStore,
    pub(crate) state_tx: watch::Sender<ConnectionState>,
    pub(crate) shutdown_rx: watch::Receiver<bool>,
}

/// Why one connection ended.
enum SessionEnd {
    /// Socket lost or handshake aborted; reconnect after the fixed delay.
    Lost,
    /// Owner asked for teardown; terminal for this session.
    Shutdown,
}

/// Run connections for one subscription identity until torn down.
///
/// Every connection loss schedules a retry after the fixed delay —
/// unbounded, no backoff growth. Teardown runs the full cleanup sequence:
/// heartbeat, pending reconnect, socket, snapshot store.
pub(crate) async fn session_loop(mut ctx: SessionContext) {
    loop {
        ctx.state_tx.send_replace(ConnectionState::Connecting);

        match run_connection(&mut ctx).await {
            SessionEnd::Shutdown => break,
            SessionEnd::Lost => {}
        }

        ctx.state_tx
            .send_replace(ConnectionState::Closed { will_retry: true });
        info!(
            delay_ms = ctx.reconnect_delay.as_millis() as u64,
            "presence connection lost, reconnecting after delay"
        );

        tokio::select! {
            _ = tokio::time::sleep(ctx.reconnect_delay) => {}
            _ = wait_for_shutdown(&mut ctx.shutdown_rx) => break,
        }
    }

    // The heartbeat and socket are already gone (run_connection cleans up
    // before returning) and any pending reconnect was cancelled above;
    // dropping the snapshot is the final teardown step.
    ctx.store.clear();
    ctx.state_tx
        .send_replace(ConnectionState::Closed { will_retry: false });
    debug!(identity = %ctx.identity, "presence session torn down");
}

/// Dial once and pump events until the connection ends.
async fn run_connection(ctx: &mut SessionContext) -> SessionEnd {
    let connected = tokio::select! {
        result = ctx.factory.connect() => result,
        _ = wait_for_shutdown(&mut ctx.shutdown_rx) => return SessionEnd::Shutdown,
    };

    let (transport, mut events) = match connected {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "failed to connect to presence gateway");
            return SessionEnd::Lost;
        }
    };

    let mut heartbeat = HeartbeatScheduler::new();
    let end = drive_events(ctx, &transport, &mut events, &mut heartbeat).await;

    // Teardown order matters: heartbeat first, then the socket.
    heartbeat.stop();
    transport.close().await;
    end
}

/// Process transport events for one live connection.
async fn drive_events(
    ctx: &mut SessionContext,
    transport: &Arc<dyn Transport>,
    events: &mut mpsc::Receiver<TransportEvent>,
    heartbeat: &mut HeartbeatScheduler,
) -> SessionEnd {
    loop {
        let event = tokio::select! {
            event = events.recv() => event,
            _ = wait_for_shutdown(&mut ctx.shutdown_rx) => return SessionEnd::Shutdown,
        };

        // The read pump dropped its sender without a close event.
        let Some(event) = event else {
            return SessionEnd::Lost;
        };

        match event {
            TransportEvent::Opened => {
                if *ctx.state_tx.borrow() != ConnectionState::Connecting {
                    debug!("spurious open event, ignoring");
                    continue;
                }
                debug!(identity = %ctx.identity, "socket open, subscribing");
                if let Err(e) = transport.send_text(encode_subscribe(&ctx.identity)).await {
                    warn!(error = %e, "subscribe send failed");
                    return SessionEnd::Lost;
                }
                ctx.state_tx.send_replace(ConnectionState::AwaitingHello);
            }
            TransportEvent::Message(text) => match handle_frame(&text) {
                Ok(FrameAction::StartHeartbeat(interval)) => {
                    debug!(
                        interval_ms = interval.as_millis() as u64,
                        "hello received, starting heartbeat"
                    );
                    heartbeat.start(interval, Arc::clone(transport));
                    ctx.state_tx.send_replace(ConnectionState::Subscribed);
                }
                Ok(FrameAction::Snapshot(snapshot)) => {
                    // Protocol ordering makes a presence frame before the
                    // hello impossible; tolerate one anyway.
                    if *ctx.state_tx.borrow() == ConnectionState::Subscribed {
                        ctx.store.set(*snapshot);
                    } else {
                        debug!("presence frame before hello, ignoring");
                    }
                }
                Ok(FrameAction::Ignore) => {}
                Err(PresenceError::MalformedFrame(msg)) => {
                    warn!(error = %msg, "dropping malformed frame");
                }
                Err(e) => {
                    warn!(error = %e, "aborting session");
                    return SessionEnd::Lost;
                }
            },
            TransportEvent::Closed => {
                return SessionEnd::Lost;
            }
        }
    }
}

/// Resolves when the owner signals teardown (or drops the client).
async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown_rx.borrow() {
            return;
        }
        if shutdown_rx.changed().await.is_err() {
            return;
        }
    }
}
