//! Profile document validation.
//!
//! Checks numeric ranges and cross-field requirements, collecting every
//! problem into a single `ConfigError` rather than stopping at the first.

use beacon_common::ConfigError;

use crate::schema::ProfileConfig;

/// Run all validations on a document, collecting all errors.
pub fn validate(config: &ProfileConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_theme(&mut errors, config);
    validate_user(&mut errors, config);
    validate_music(&mut errors, config);
    validate_socials(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_theme(errors: &mut Vec<String>, config: &ProfileConfig) {
    if config.theme.profile_opacity > 100 {
        errors.push(format!(
            "theme.profileOpacity must be 0-100, got {}",
            config.theme.profile_opacity
        ));
    }
    if config.theme.profile_blur > 100 {
        errors.push(format!(
            "theme.profileBlur must be 0-100, got {}",
            config.theme.profile_blur
        ));
    }
}

fn validate_user(errors: &mut Vec<String>, config: &ProfileConfig) {
    // An empty id means "no presence connection", which is valid.
    let id = &config.user.discord_id;
    if !id.is_empty() && !id.chars().all(|c| c.is_ascii_digit()) {
        errors.push(format!("user.discordId must be a numeric snowflake, got '{id}'"));
    }
}

fn validate_music(errors: &mut Vec<String>, config: &ProfileConfig) {
    if config.music.volume > 100 {
        errors.push(format!(
            "music.volume must be 0-100, got {}",
            config.music.volume
        ));
    }
    if config.music.enabled && config.music.url.is_empty() {
        errors.push("music.url is required when music is enabled".into());
    }
}

fn validate_socials(errors: &mut Vec<String>, config: &ProfileConfig) {
    for (i, social) in config.socials.iter().enumerate() {
        if social.platform.is_empty() {
            errors.push(format!("socials[{i}].platform is empty"));
        }
        if social.url.is_empty() {
            errors.push(format!("socials[{i}].url is empty"));
        }
    }
}
