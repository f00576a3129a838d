//! Profile configuration for beacon.
//!
//! The whole site is driven by a single JSON document (the shape the admin
//! panel edits and the hosted backend persists). All sections use sensible
//! defaults so a partial document works out of the box.
//!
//! # Quick Start
//!
//! ```rust
//! use beacon_config::load_from_str;
//!
//! let config = load_from_str(r#"{"user": {"username": "dylan"}}"#).unwrap();
//! assert_eq!(config.user.username, "dylan");
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_path, load_from_str};
pub use schema::{
    GitHubConfig, GitHubRepo, MusicConfig, ProfileConfig, SiteMetadata, SocialLink, ThemeColors,
    ThemeConfig, ThemeEffects, UserConfig, WeatherEffect,
};
pub use validation::validate;
