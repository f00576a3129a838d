//! Profile document loading from JSON.

use std::path::Path;

use beacon_common::ConfigError;
use tracing::{info, warn};

use crate::schema::ProfileConfig;
use crate::validation;

/// Parse a profile document from a JSON string.
///
/// Missing fields are filled with serde defaults. After parsing, the
/// document is validated; a validation failure is logged as a warning and
/// the parsed document is returned as-is.
pub fn load_from_str(json: &str) -> Result<ProfileConfig, ConfigError> {
    let config: ProfileConfig = serde_json::from_str(json)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse JSON: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e} — using parsed config as-is");
    }

    Ok(config)
}

/// Load a profile document from a JSON file path.
///
/// Used for the bundled fallback document shipped with the site; the live
/// document comes from the hosted backend.
pub fn load_from_path(path: &Path) -> Result<ProfileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = load_from_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_valid_partial_json() {
        let config = load_from_str(
            r##"{
                "user": { "username": "dylan", "discordId": "94490510688792576" },
                "theme": { "profileOpacity": 60, "colors": { "primary": "#ff0000" } }
            }"##,
        )
        .unwrap();

        assert_eq!(config.user.username, "dylan");
        assert_eq!(config.user.discord_id, "94490510688792576");
        assert_eq!(config.theme.profile_opacity, 60);
        assert_eq!(config.theme.colors.primary, "#ff0000");
        // Defaults preserved
        assert_eq!(config.user.offline_status, "Offline");
        assert_eq!(config.site_metadata.title, "beacon");
        assert!(config.github.is_none());
    }

    #[test]
    fn load_invalid_json_returns_parse_error() {
        let result = load_from_str("this is not valid json {{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn load_from_nonexistent_path_returns_parse_error() {
        let result = load_from_path(Path::new("/tmp/nonexistent_beacon_config.json"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_from_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ProfileConfig::default();
        config.user.username = "dylan".into();
        config.socials.push(crate::schema::SocialLink {
            platform: "github".into(),
            url: "https://github.com/dylan".into(),
            icon: String::new(),
        });
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.user.username, "dylan");
        assert_eq!(loaded.socials.len(), 1);
        assert_eq!(loaded.socials[0].platform, "github");
    }

    #[test]
    fn document_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ProfileConfig::default()).unwrap();
        assert!(json.get("siteMetadata").is_some());
        assert!(json["user"].get("offlineStatus").is_some());
        assert!(json["theme"].get("profileOpacity").is_some());
    }
}
