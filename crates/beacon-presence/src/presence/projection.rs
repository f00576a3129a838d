//! Display projection: one snapshot in, one activity line out.

use crate::protocol::{DiscordUser, PresenceSnapshot, PresenceStatus};

/// Base URL substituted for the `mp:` media-proxy prefix.
pub const MEDIA_PROXY_BASE: &str = "https://media.discordapp.net/";
/// CDN root for application asset images.
pub const APP_ASSET_BASE: &str = "https://cdn.discordapp.com/app-assets";
/// CDN root for user avatars.
pub const AVATAR_BASE: &str = "https://cdn.discordapp.com/avatars";

/// Display-ready summary of a snapshot; exactly one of four cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityDisplay {
    /// No snapshot, or the user is offline: show the configured text.
    Offline { label: String },
    /// A custom status (free text + optional emoji).
    Custom { label: String, emoji: Option<String> },
    /// A real game/app activity.
    Activity {
        name: String,
        details: Option<String>,
        state: Option<String>,
        image: Option<String>,
        application_id: Option<String>,
    },
    /// Online/idle/dnd with nothing else to show.
    Status { label: String },
}

/// Status dot color shown next to the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
    Gray,
}

/// Project a snapshot into the single activity line the profile card
/// renders.
///
/// The priority order is a hard contract: offline beats custom status
/// beats real activity beats plain status.
pub fn project(snapshot: Option<&PresenceSnapshot>, offline_label: &str) -> ActivityDisplay {
    let Some(snapshot) = snapshot else {
        return ActivityDisplay::Offline {
            label: offline_label.to_string(),
        };
    };
    if snapshot.discord_status == PresenceStatus::Offline {
        return ActivityDisplay::Offline {
            label: offline_label.to_string(),
        };
    }

    // First type-4 entry is authoritative even when several exist.
    if let Some(custom) = snapshot.activities.iter().find(|a| a.is_custom_status()) {
        return ActivityDisplay::Custom {
            label: custom.state.clone().unwrap_or_default(),
            emoji: custom.emoji.as_ref().map(|e| e.name.clone()),
        };
    }

    if let Some(activity) = snapshot.activities.iter().find(|a| !a.is_custom_status()) {
        let image = activity
            .assets
            .as_ref()
            .and_then(|assets| assets.large_image.as_deref())
            .and_then(|raw| resolve_asset_url(raw, activity.application_id.as_deref()));
        return ActivityDisplay::Activity {
            name: activity.name.clone(),
            details: activity.details.clone(),
            state: activity.state.clone(),
            image,
            application_id: activity.application_id.clone(),
        };
    }

    ActivityDisplay::Status {
        label: snapshot.discord_status.label().to_string(),
    }
}

/// Resolve a raw asset reference into a fetchable image URL.
///
/// `mp:`-prefixed references are media-proxy paths; anything else needs
/// the activity's application id to build a CDN app-asset URL.
pub fn resolve_asset_url(raw: &str, application_id: Option<&str>) -> Option<String> {
    if let Some(path) = raw.strip_prefix("mp:") {
        return Some(format!("{MEDIA_PROXY_BASE}{path}"));
    }
    application_id.map(|app_id| format!("{APP_ASSET_BASE}/{app_id}/{raw}.png"))
}

/// CDN URL for the live avatar, when the user has one set.
pub fn avatar_url(user: &DiscordUser) -> Option<String> {
    user.avatar
        .as_ref()
        .map(|hash| format!("{AVATAR_BASE}/{}/{hash}.png?size=256", user.id))
}

/// Status dot color for a (possibly absent) snapshot.
pub fn status_color(snapshot: Option<&PresenceSnapshot>) -> StatusColor {
    match snapshot.map(|s| s.discord_status) {
        Some(PresenceStatus::Online) => StatusColor::Green,
        Some(PresenceStatus::Idle) => StatusColor::Yellow,
        Some(PresenceStatus::Dnd) => StatusColor::Red,
        Some(PresenceStatus::Offline) | None => StatusColor::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Activity, ActivityAssets, ActivityEmoji};

    fn custom_status(text: &str) -> Activity {
        Activity {
            kind: 4,
            name: "Custom Status".into(),
            state: Some(text.into()),
            details: None,
            application_id: None,
            assets: None,
            timestamps: None,
            emoji: Some(ActivityEmoji {
                name: "🔨".into(),
                id: None,
                animated: None,
            }),
        }
    }

    fn game(name: &str, image: Option<&str>, application_id: Option<&str>) -> Activity {
        Activity {
            kind: 0,
            name: name.into(),
            state: Some("In a match".into()),
            details: Some("Ranked".into()),
            application_id: application_id.map(Into::into),
            assets: image.map(|raw| ActivityAssets {
                large_image: Some(raw.into()),
                ..Default::default()
            }),
            timestamps: None,
            emoji: None,
        }
    }

    fn snapshot(status: PresenceStatus, activities: Vec<Activity>) -> PresenceSnapshot {
        PresenceSnapshot {
            discord_status: status,
            activities,
            ..Default::default()
        }
    }

    #[test]
    fn absent_snapshot_projects_offline() {
        let display = project(None, "Sleeping");
        assert_eq!(
            display,
            ActivityDisplay::Offline {
                label: "Sleeping".into()
            }
        );
    }

    #[test]
    fn offline_wins_even_with_activities() {
        let snap = snapshot(
            PresenceStatus::Offline,
            vec![custom_status("hi"), game("Factorio", None, None)],
        );
        let display = project(Some(&snap), "Gone");
        assert_eq!(display, ActivityDisplay::Offline { label: "Gone".into() });
    }

    #[test]
    fn custom_status_beats_game_activity() {
        let snap = snapshot(
            PresenceStatus::Online,
            vec![game("Factorio", None, None), custom_status("building")],
        );
        let display = project(Some(&snap), "Offline");
        assert_eq!(
            display,
            ActivityDisplay::Custom {
                label: "building".into(),
                emoji: Some("🔨".into()),
            }
        );
    }

    #[test]
    fn first_custom_status_is_authoritative() {
        let snap = snapshot(
            PresenceStatus::Online,
            vec![custom_status("first"), custom_status("second")],
        );
        match project(Some(&snap), "Offline") {
            ActivityDisplay::Custom { label, .. } => assert_eq!(label, "first"),
            other => panic!("expected Custom, got {other:?}"),
        }
    }

    #[test]
    fn game_activity_resolves_media_proxy_image() {
        let snap = snapshot(
            PresenceStatus::Online,
            vec![game("Factorio", Some("mp:external/abc.png"), None)],
        );
        match project(Some(&snap), "Offline") {
            ActivityDisplay::Activity { name, image, .. } => {
                assert_eq!(name, "Factorio");
                assert_eq!(
                    image.as_deref(),
                    Some("https://media.discordapp.net/external/abc.png")
                );
            }
            other => panic!("expected Activity, got {other:?}"),
        }
    }

    #[test]
    fn game_activity_resolves_app_asset_image() {
        let snap = snapshot(
            PresenceStatus::Online,
            vec![game("Factorio", Some("abc123"), Some("999"))],
        );
        match project(Some(&snap), "Offline") {
            ActivityDisplay::Activity { image, application_id, .. } => {
                assert_eq!(
                    image.as_deref(),
                    Some("https://cdn.discordapp.com/app-assets/999/abc123.png")
                );
                assert_eq!(application_id.as_deref(), Some("999"));
            }
            other => panic!("expected Activity, got {other:?}"),
        }
    }

    #[test]
    fn asset_without_application_id_has_no_image() {
        let snap = snapshot(
            PresenceStatus::Online,
            vec![game("Factorio", Some("abc123"), None)],
        );
        match project(Some(&snap), "Offline") {
            ActivityDisplay::Activity { image, .. } => assert!(image.is_none()),
            other => panic!("expected Activity, got {other:?}"),
        }
    }

    #[test]
    fn bare_status_projects_capitalized_label() {
        for (status, label) in [
            (PresenceStatus::Online, "Online"),
            (PresenceStatus::Idle, "Idle"),
            (PresenceStatus::Dnd, "Dnd"),
        ] {
            let snap = snapshot(status, Vec::new());
            assert_eq!(
                project(Some(&snap), "Offline"),
                ActivityDisplay::Status { label: label.into() }
            );
        }
    }

    #[test]
    fn avatar_url_uses_id_and_hash() {
        let user = DiscordUser {
            id: "94490510688792576".into(),
            username: "phin".into(),
            avatar: Some("a1b2c3".into()),
            avatar_decoration_data: None,
        };
        assert_eq!(
            avatar_url(&user).unwrap(),
            "https://cdn.discordapp.com/avatars/94490510688792576/a1b2c3.png?size=256"
        );

        let bald = DiscordUser {
            avatar: None,
            ..user
        };
        assert!(avatar_url(&bald).is_none());
    }

    #[test]
    fn status_colors_match_statuses() {
        assert_eq!(status_color(None), StatusColor::Gray);
        let snap = snapshot(PresenceStatus::Online, Vec::new());
        assert_eq!(status_color(Some(&snap)), StatusColor::Green);
        let snap = snapshot(PresenceStatus::Idle, Vec::new());
        assert_eq!(status_color(Some(&snap)), StatusColor::Yellow);
        let snap = snapshot(PresenceStatus::Dnd, Vec::new());
        assert_eq!(status_color(Some(&snap)), StatusColor::Red);
        let snap = snapshot(PresenceStatus::Offline, Vec::new());
        assert_eq!(status_color(Some(&snap)), StatusColor::Gray);
    }
}
