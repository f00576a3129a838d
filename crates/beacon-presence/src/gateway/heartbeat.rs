//! Periodic keep-alive sender.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::protocol::encode_heartbeat;
use crate::transport::Transport;

/// Repeating timer that sends a heartbeat frame every interval.
///
/// One scheduler exists per session. `start` while already running first
/// stops the previous timer, so two can never tick concurrently. The
/// interval comes from the server hello and is used as-is.
pub(crate) struct HeartbeatScheduler {
    handle: Option<JoinHandle<()>>,
}

impl HeartbeatScheduler {
    pub(crate) fn new() -> Self {
        Self { handle: None }
    }

    /// Begin ticking every `interval`.
    pub(crate) fn start(&mut self, interval: Duration, transport: Arc<dyn Transport>) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // an interval's first tick fires immediately; the first
            // heartbeat belongs one full period after the hello
            ticker.tick().await;
            loop {
                ticker.tick().await;
                debug!("sending heartbeat");
                if transport.send_text(encode_heartbeat()).await.is_err() {
                    debug!("heartbeat send failed, stopping ticker");
                    return;
                }
            }
        }));
    }

    /// Cancel the pending timer, if any. Idempotent.
    pub(crate) fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for HeartbeatScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
