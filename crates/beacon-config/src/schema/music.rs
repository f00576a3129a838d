//! Music player configuration.

use serde::{Deserialize, Serialize};

/// Background music player settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusicConfig {
    pub enabled: bool,
    /// Playback volume, 0–100.
    pub volume: u8,
    pub autoplay: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_icon_url: Option<String>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 50,
            autoplay: false,
            url: String::new(),
            song_title: None,
            album_icon_url: None,
        }
    }
}
