//! Client owning the presence subscription lifecycle.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::gateway::connection::{session_loop, SessionContext};
use crate::gateway::ConnectionState;
use crate::presence::store::SnapshotStore;
use crate::presence::types::PresenceConfig;
use crate::transport::{TransportFactory, WebSocketTransportFactory};

/// One live gateway session.
struct Session {
    identity: String,
    shutdown_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<ConnectionState>,
    handle: JoinHandle<()>,
}

/// Owns at most one presence subscription at a time.
///
/// All protocol failures are absorbed by the background session; consumers
/// only ever observe the snapshot store and the connection state. Changing
/// the identity tears the current session down and starts a fresh one — a
/// second subscribe frame is never sent on a live socket.
pub struct PresenceClient {
    config: PresenceConfig,
    factory: Arc<dyn TransportFactory>,
    store: SnapshotStore,
    session: Option<Session>,
}

impl PresenceClient {
    /// Client dialing the gateway endpoint from `config`.
    pub fn new(config: PresenceConfig) -> Self {
        let factory = Arc::new(WebSocketTransportFactory::new(
            config.gateway_url.clone(),
            config.connect_timeout,
        ));
        Self::with_factory(config, factory)
    }

    /// Client with an injected transport factory.
    pub fn with_factory(config: PresenceConfig, factory: Arc<dyn TransportFactory>) -> Self {
        Self {
            config,
            factory,
            store: SnapshotStore::new(),
            session: None,
        }
    }

    /// Subscribe to presence for `identity`, replacing any live session.
    ///
    /// An empty identity tears down the current session and stays idle —
    /// the deliberate "nothing configured" no-op, not an error. The same
    /// identity again is a no-op.
    pub async fn subscribe(&mut self, identity: &str) {
        if let Some(session) = &self.session {
            if session.identity == identity {
                return;
            }
        }
        self.teardown().await;

        if identity.is_empty() {
            debug!("no identity configured, staying idle");
            return;
        }

        info!(identity = %identity, "starting presence session");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Idle);

        let ctx = SessionContext {
            identity: identity.to_string(),
            reconnect_delay: self.config.reconnect_delay,
            factory: Arc::clone(&self.factory),
            store: self.store.clone(),
            state_tx,
            shutdown_rx,
        };
        let handle = tokio::spawn(session_loop(ctx));

        self.session = Some(Session {
            identity: identity.to_string(),
            shutdown_tx,
            state_rx,
            handle,
        });
    }

    /// Tear down the live session, if any. Safe to call repeatedly.
    pub async fn shutdown(&mut self) {
        self.teardown().await;
    }

    async fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            info!(identity = %session.identity, "tearing down presence session");
            let _ = session.shutdown_tx.send(true);
            let _ = session.handle.await;
        }
    }

    /// Handle to the snapshot store for reads and observer registration.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Current connection state; `Idle` when no session is running.
    pub fn state(&self) -> ConnectionState {
        match &self.session {
            Some(session) => *session.state_rx.borrow(),
            None => ConnectionState::Idle,
        }
    }

    /// Receiver for state transitions of the live session, if any.
    pub fn state_receiver(&self) -> Option<watch::Receiver<ConnectionState>> {
        self.session.as_ref().map(|s| s.state_rx.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::{settle, MockFactory};
    use crate::transport::TransportEvent;

    fn test_client(factory: &Arc<MockFactory>) -> PresenceClient {
        PresenceClient::with_factory(
            PresenceConfig::default(),
            Arc::clone(factory) as Arc<dyn TransportFactory>,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn empty_identity_never_connects() {
        let factory = Arc::new(MockFactory::new());
        let mut client = test_client(&factory);

        client.subscribe("").await;
        settle().await;

        assert_eq!(client.state(), ConnectionState::Idle);
        assert_eq!(factory.connect_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn identity_change_restarts_the_session() {
        let factory = Arc::new(MockFactory::new());
        let mut client = test_client(&factory);

        client.subscribe("111").await;
        settle().await;
        assert_eq!(factory.connect_count(), 1);

        client.subscribe("222").await;
        settle().await;
        assert_eq!(factory.connect_count(), 2);

        // One subscribe frame per connection, never two on one socket.
        let subscribes: Vec<String> = factory
            .sent_frames()
            .into_iter()
            .filter(|f| f.contains("subscribe_to_id"))
            .collect();
        assert_eq!(subscribes.len(), 2);
        assert!(subscribes[0].contains("111"));
        assert!(subscribes[1].contains("222"));
    }

    #[tokio::test(start_paused = true)]
    async fn resubscribing_same_identity_is_a_no_op() {
        let factory = Arc::new(MockFactory::new());
        let mut client = test_client(&factory);

        client.subscribe("111").await;
        settle().await;
        client.subscribe("111").await;
        settle().await;

        assert_eq!(factory.connect_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_clears_store_and_is_idempotent() {
        let factory = Arc::new(MockFactory::new());
        let mut client = test_client(&factory);

        client.subscribe("111").await;
        settle().await;
        let server = factory.server(0);
        server
            .send(TransportEvent::Message(
                r#"{"op":1,"d":{"heartbeat_interval":30000}}"#.into(),
            ))
            .await
            .unwrap();
        server
            .send(TransportEvent::Message(
                r#"{"t":"INIT_STATE","d":{"discord_status":"online","activities":[]}}"#.into(),
            ))
            .await
            .unwrap();
        settle().await;
        assert!(client.store().get().is_some());

        client.shutdown().await;
        assert!(client.store().get().is_none());
        assert_eq!(client.state(), ConnectionState::Idle);

        // A second shutdown is a no-op with the same end state.
        client.shutdown().await;
        assert!(client.store().get().is_none());
        assert_eq!(client.state(), ConnectionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn emptying_the_identity_tears_down_to_idle() {
        let factory = Arc::new(MockFactory::new());
        let mut client = test_client(&factory);

        client.subscribe("111").await;
        settle().await;
        assert_eq!(factory.connect_count(), 1);

        client.subscribe("").await;
        settle().await;
        assert_eq!(client.state(), ConnectionState::Idle);
        assert_eq!(factory.connect_count(), 1);
    }
}
