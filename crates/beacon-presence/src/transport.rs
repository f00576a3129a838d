//! Socket transport seam.
//!
//! The gateway session drives a [`Transport`] it gets from a
//! [`TransportFactory`], so tests can script an in-memory connection while
//! production dials the real gateway over tokio-tungstenite.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::PresenceError;

/// An event produced by the transport layer.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// The socket is open and ready to send.
    Opened,
    /// One text message (one frame) arrived.
    Message(String),
    /// The connection closed or errored.
    Closed,
}

/// An active connection to the gateway.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one text frame.
    async fn send_text(&self, text: String) -> Result<(), PresenceError>;

    /// Close the connection. Idempotent.
    async fn close(&self);
}

/// Creates one connection per call.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// Dial the gateway, returning the send half and a stream of events.
    async fn connect(
        &self,
    ) -> Result<(Arc<dyn Transport>, mpsc::Receiver<TransportEvent>), PresenceError>;
}

type RawWs = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<RawWs, WsMessage>;
type WsStream = SplitStream<RawWs>;

/// WebSocket transport over tokio-tungstenite.
pub struct WebSocketTransport {
    sink: Arc<Mutex<Option<WsSink>>>,
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send_text(&self, text: String) -> Result<(), PresenceError> {
        let mut guard = self.sink.lock().await;
        let sink = guard
            .as_mut()
            .ok_or_else(|| PresenceError::Transport("socket is closed".into()))?;
        sink.send(WsMessage::Text(text.into()))
            .await
            .map_err(|e| PresenceError::Transport(e.to_string()))
    }

    async fn close(&self) {
        let mut guard = self.sink.lock().await;
        if let Some(mut sink) = guard.take() {
            let _ = sink.send(WsMessage::Close(None)).await;
        }
    }
}

/// Factory dialing the real presence gateway.
pub struct WebSocketTransportFactory {
    url: String,
    connect_timeout: Duration,
}

impl WebSocketTransportFactory {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }
}

#[async_trait]
impl TransportFactory for WebSocketTransportFactory {
    async fn connect(
        &self,
    ) -> Result<(Arc<dyn Transport>, mpsc::Receiver<TransportEvent>), PresenceError> {
        info!(url = %self.url, "connecting to presence gateway");

        let (ws_stream, _response) = tokio::time::timeout(
            self.connect_timeout,
            tokio_tungstenite::connect_async(self.url.as_str()),
        )
        .await
        .map_err(|_| {
            PresenceError::Transport(format!(
                "connect timed out after {}s",
                self.connect_timeout.as_secs()
            ))
        })?
        .map_err(|e| PresenceError::Transport(e.to_string()))?;

        let (sink, stream) = ws_stream.split();
        let (event_tx, event_rx) = mpsc::channel(64);

        // Opened must be queued before the read pump can race a message in.
        let _ = event_tx.try_send(TransportEvent::Opened);
        tokio::spawn(read_pump(stream, event_tx));

        let transport = WebSocketTransport {
            sink: Arc::new(Mutex::new(Some(sink))),
        };
        Ok((Arc::new(transport), event_rx))
    }
}

async fn read_pump(mut stream: WsStream, event_tx: mpsc::Sender<TransportEvent>) {
    while let Some(result) = stream.next().await {
        match result {
            Ok(WsMessage::Text(text)) => {
                if event_tx
                    .send(TransportEvent::Message(text.to_string()))
                    .await
                    .is_err()
                {
                    debug!("event receiver dropped, closing read pump");
                    return;
                }
            }
            Ok(WsMessage::Close(_)) => {
                info!("presence gateway closed the connection");
                break;
            }
            Ok(_) => {} // ping/pong/binary are not frames
            Err(e) => {
                warn!(error = %e, "websocket error");
                break;
            }
        }
    }
    let _ = event_tx.send(TransportEvent::Closed).await;
}
