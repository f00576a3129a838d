//! User identity configuration.

use serde::{Deserialize, Serialize};

/// The profile owner's identity and presence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserConfig {
    pub username: String,
    /// Short status line shown under the username.
    pub status: String,
    pub avatar_url: String,
    /// Lines cycled through by the typewriter description.
    pub description: Vec<String>,
    pub location: String,
    /// Discord snowflake to subscribe live presence for. Empty disables
    /// the presence connection entirely.
    pub discord_id: String,
    /// Prefer the live Discord avatar over `avatar_url` when available.
    pub use_discord_avatar: bool,
    /// Text shown by the presence projection when the user is offline.
    pub offline_status: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            username: "anonymous".into(),
            status: String::new(),
            avatar_url: String::new(),
            description: Vec::new(),
            location: String::new(),
            discord_id: String::new(),
            use_discord_avatar: false,
            offline_status: "Offline".into(),
        }
    }
}
