//! Presence snapshot store, display projection, and the owning client.
//!
//! The gateway session writes into the [`SnapshotStore`]; the rendering
//! layer reads through [`project`] to get one display-ready activity line.

mod client;
mod projection;
mod store;
mod types;

pub use client::PresenceClient;
pub use projection::{
    avatar_url, project, resolve_asset_url, status_color, ActivityDisplay, StatusColor,
};
pub use store::{ObserverId, SnapshotStore};
pub use types::{PresenceConfig, DEFAULT_GATEWAY_URL};
