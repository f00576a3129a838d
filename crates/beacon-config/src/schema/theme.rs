//! Theme and visual effect configuration types.

use serde::{Deserialize, Serialize};

/// Theme configuration: opacity, background media, palette, effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Profile card opacity, 0–100.
    pub profile_opacity: u8,
    /// Profile card backdrop blur, 0–100.
    pub profile_blur: u8,
    pub background_url: String,
    pub custom_cursor_url: String,
    pub colors: ThemeColors,
    pub effects: ThemeEffects,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            profile_opacity: 80,
            profile_blur: 10,
            background_url: String::new(),
            custom_cursor_url: String::new(),
            colors: ThemeColors::default(),
            effects: ThemeEffects::default(),
        }
    }
}

/// Color palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    pub icon: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#d946ef".into(),
            secondary: "#0f172a".into(),
            accent: "#f0abfc".into(),
            text: "#ffffff".into(),
            background: "#0f0f0f".into(),
            icon: "#ffffff".into(),
        }
    }
}

/// Toggleable visual effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeEffects {
    pub glow: bool,
    pub background_blur: bool,
    pub animated_title: bool,
    pub monochrome_icons: bool,
    pub tilt: bool,
    pub weather: WeatherEffect,
    pub visualizer: bool,
}

impl Default for ThemeEffects {
    fn default() -> Self {
        Self {
            glow: true,
            background_blur: true,
            animated_title: false,
            monochrome_icons: false,
            tilt: false,
            weather: WeatherEffect::None,
            visualizer: false,
        }
    }
}

/// Ambient particle overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherEffect {
    #[default]
    None,
    Cherry,
    Snow,
    Matrix,
}
