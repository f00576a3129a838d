//! Social link configuration.

use serde::{Deserialize, Serialize};

/// One social platform link rendered on the profile card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}
