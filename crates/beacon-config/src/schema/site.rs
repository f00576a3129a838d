//! Site metadata configuration.

use serde::{Deserialize, Serialize};

/// Page-level metadata (title, description, favicon).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub favicon: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "beacon".into(),
            description: "personal bio-link page".into(),
            favicon: "/favicon.ico".into(),
        }
    }
}
