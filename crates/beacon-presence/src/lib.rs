//! Real-time presence client for the profile page.
//!
//! Maintains a persistent, self-healing subscription to a Discord-presence
//! gateway: dial, subscribe, answer the hello handshake with heartbeats,
//! and feed every presence update into a snapshot store the rendering
//! layer observes. Connection loss triggers an unbounded fixed-delay
//! reconnect — presence is best-effort decoration, so failures degrade to
//! "no presence shown", never to an error surfaced upward.

pub mod gateway;
pub mod presence;
pub mod protocol;
pub mod transport;

pub use gateway::ConnectionState;
pub use presence::{
    avatar_url, project, resolve_asset_url, status_color, ActivityDisplay, ObserverId,
    PresenceClient, PresenceConfig, SnapshotStore, StatusColor,
};
pub use protocol::{
    Activity, DiscordUser, GatewayFrame, PresenceSnapshot, PresenceStatus, SpotifyTrack,
};
pub use transport::{Transport, TransportEvent, TransportFactory, WebSocketTransportFactory};

/// Errors inside the presence subsystem.
///
/// These never escape the background session: malformed frames are
/// dropped, everything else funnels into the reconnect path.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    /// A received message did not decode; the frame is dropped and the
    /// connection stays open.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The hello frame was missing a usable heartbeat interval; the
    /// session is aborted and reconnects.
    #[error("invalid handshake: {0}")]
    InvalidHandshake(String),

    /// Socket-level failure; triggers the standard reconnect.
    #[error("transport error: {0}")]
    Transport(String),
}
