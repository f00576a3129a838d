//! Wire protocol for the presence gateway.
//!
//! Every socket message is exactly one JSON frame: a small envelope with
//! an opcode for control frames, or an event type + payload for dispatch
//! frames. The payload types mirror the documents the gateway pushes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PresenceError;

/// Frame opcodes.
pub mod opcode {
    /// Dispatch frame carrying an event type and payload.
    pub const EVENT: u8 = 0;
    /// Server hello announcing the heartbeat interval.
    pub const HELLO: u8 = 1;
    /// Client subscribe request.
    pub const SUBSCRIBE: u8 = 2;
    /// Client keep-alive.
    pub const HEARTBEAT: u8 = 3;
}

/// Event types carried by dispatch frames.
pub mod events {
    /// Full state pushed right after subscribing.
    pub const INIT_STATE: &str = "INIT_STATE";
    /// Full state pushed on every subsequent change.
    pub const PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";
}

/// Activity type tag marking a free-text custom status.
pub const CUSTOM_STATUS: u8 = 4;

/// The JSON envelope exchanged over the socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

/// Decode one received text message into a frame.
pub fn decode_frame(text: &str) -> Result<GatewayFrame, PresenceError> {
    serde_json::from_str(text).map_err(|e| PresenceError::MalformedFrame(e.to_string()))
}

/// Subscribe frame for one identity.
pub fn encode_subscribe(identity: &str) -> String {
    serde_json::json!({
        "op": opcode::SUBSCRIBE,
        "d": { "subscribe_to_id": identity },
    })
    .to_string()
}

/// Keep-alive frame.
pub fn encode_heartbeat() -> String {
    serde_json::json!({ "op": opcode::HEARTBEAT }).to_string()
}

// ---------------------------------------------------------------------------
// Presence documents
// ---------------------------------------------------------------------------

/// Online status of the subscribed identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Online,
    Idle,
    Dnd,
    #[default]
    Offline,
}

impl PresenceStatus {
    /// Capitalized wire name, for the plain-status display case.
    pub fn label(self) -> &'static str {
        match self {
            PresenceStatus::Online => "Online",
            PresenceStatus::Idle => "Idle",
            PresenceStatus::Dnd => "Dnd",
            PresenceStatus::Offline => "Offline",
        }
    }
}

/// The subscribed Discord user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub avatar_decoration_data: Option<AvatarDecoration>,
}

/// Avatar decoration asset reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarDecoration {
    pub asset: String,
    #[serde(default)]
    pub sku_id: Option<String>,
}

/// One reported activity.
///
/// `type` 4 is a custom status (free text + optional emoji); anything else
/// is a real game/app activity. Order in the snapshot is not meaningful —
/// consumers search, never index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub assets: Option<ActivityAssets>,
    #[serde(default)]
    pub timestamps: Option<ActivityTimestamps>,
    #[serde(default)]
    pub emoji: Option<ActivityEmoji>,
}

impl Activity {
    pub fn is_custom_status(&self) -> bool {
        self.kind == CUSTOM_STATUS
    }
}

/// Image references attached to an activity. A `large_image` starting with
/// `mp:` is a media-proxy path that needs URL rewriting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityAssets {
    #[serde(default)]
    pub large_image: Option<String>,
    #[serde(default)]
    pub large_text: Option<String>,
    #[serde(default)]
    pub small_image: Option<String>,
    #[serde(default)]
    pub small_text: Option<String>,
}

/// Absolute epoch-millisecond window of an activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityTimestamps {
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub end: Option<u64>,
}

/// Emoji attached to a custom status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEmoji {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub animated: Option<bool>,
}

/// Currently playing Spotify track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub track_id: Option<String>,
    pub song: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: String,
    #[serde(default)]
    pub timestamps: ActivityTimestamps,
}

/// The latest known state for one subscribed identity.
///
/// Replaced wholesale on every update frame; never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    #[serde(default)]
    pub discord_status: PresenceStatus,
    #[serde(default)]
    pub discord_user: Option<DiscordUser>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub spotify: Option<SpotifyTrack>,
    #[serde(default)]
    pub active_on_discord_desktop: bool,
    #[serde(default)]
    pub active_on_discord_mobile: bool,
    #[serde(default)]
    pub active_on_discord_web: bool,
}
