//! Configuration schema types for the profile document.
//!
//! All structs use `serde(default)` so partial documents work correctly.
//! Wire names are camelCase, matching the JSON the admin panel reads and
//! writes; the embedded GitHub repo records keep the snake_case keys they
//! arrive with from the GitHub API.

mod github;
mod music;
mod site;
mod social;
mod theme;
mod user;

pub use github::*;
pub use music::*;
pub use site::*;
pub use social::*;
pub use theme::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Root configuration document for a profile page.
///
/// Only override what you want to change; every section has defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileConfig {
    pub site_metadata: SiteMetadata,
    pub user: UserConfig,
    pub theme: ThemeConfig,
    pub socials: Vec<SocialLink>,
    pub music: MusicConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubConfig>,
}
