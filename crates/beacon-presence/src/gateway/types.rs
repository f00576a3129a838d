//! Session state exposed to the embedding layer.

/// Lifecycle of one gateway session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No identity configured; nothing to do.
    #[default]
    Idle,
    /// Dialing the gateway.
    Connecting,
    /// Socket open, subscribe frame sent, waiting for the server hello.
    AwaitingHello,
    /// Hello processed, heartbeat running, presence frames flowing.
    Subscribed,
    /// Session over. `will_retry` distinguishes the automatic reconnect
    /// path from an owner-requested teardown.
    Closed { will_retry: bool },
}
