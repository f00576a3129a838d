//! Connection settings for the hosted backend.

/// Configuration for the hosted backend project.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL (e.g., "https://ojmqzagktzkualzgpcbq.supabase.co").
    pub base_url: String,
    /// Anon key (publishable).
    pub api_key: String,
    /// Table holding the single profile document row.
    pub config_table: String,
    /// Public bucket for uploaded media.
    pub storage_bucket: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("config_table", &self.config_table)
            .field("storage_bucket", &self.storage_bucket)
            .finish()
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            config_table: "site_config".into(),
            storage_bucket: "media".into(),
        }
    }

    /// REST endpoint for the config table.
    pub(crate) fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.config_table
        )
    }

    /// Storage endpoint for one object in the media bucket.
    pub(crate) fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.storage_bucket,
            key
        )
    }

    /// Public download URL for one object in the media bucket.
    pub(crate) fn public_object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.storage_bucket,
            key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = BackendConfig::new("https://proj.supabase.co", "secret-anon-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-anon-key"));
    }

    #[test]
    fn urls_are_built_from_base() {
        let config = BackendConfig::new("https://proj.supabase.co/", "k");
        assert_eq!(
            config.table_url(),
            "https://proj.supabase.co/rest/v1/site_config"
        );
        assert_eq!(
            config.object_url("avatars/a.png"),
            "https://proj.supabase.co/storage/v1/object/media/avatars/a.png"
        );
        assert_eq!(
            config.public_object_url("avatars/a.png"),
            "https://proj.supabase.co/storage/v1/object/public/media/avatars/a.png"
        );
    }
}
