//! GitHub section of the profile document.

use serde::{Deserialize, Serialize};

/// GitHub integration: whose repos to show and which widgets to render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub username: String,
    pub repos: Vec<GitHubRepo>,
    pub stats_widget: bool,
}

/// One repository entry, stored with the snake_case keys the GitHub API
/// returns plus the admin-panel ordering flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
    /// Hidden from the public project grid.
    pub hidden: bool,
    /// Manual sort position in the project grid.
    pub order: u32,
}
