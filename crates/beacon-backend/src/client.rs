//! Config document store over the hosted backend's REST API.

use async_trait::async_trait;
use beacon_config::ProfileConfig;
use tracing::{info, warn};

use crate::config::BackendConfig;
use crate::BackendError;

/// Read/write access to the single profile document.
///
/// Exactly one logical record exists; [`ConfigStore::write`] creates it on
/// first use.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn read(&self) -> Result<ProfileConfig, BackendError>;
    async fn write(&self, config: &ProfileConfig) -> Result<(), BackendError>;
}

/// REST client for the hosted backend's config table.
pub struct BackendClient {
    pub(crate) config: BackendConfig,
    pub(crate) http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Auth headers sent with every backend request.
    pub(crate) fn auth_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(key) = self.config.api_key.parse() {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = format!("Bearer {}", self.config.api_key).parse() {
            headers.insert(reqwest::header::AUTHORIZATION, bearer);
        }
        headers
    }

    /// Read the document, falling back to defaults on any failure.
    ///
    /// The public page must render even when the backend is unreachable,
    /// so this never errors.
    pub async fn load_config_or_default(&self) -> ProfileConfig {
        match self.read().await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "config fetch failed, using defaults");
                ProfileConfig::default()
            }
        }
    }

    /// Id of the existing config row, if one has been created.
    async fn find_row_id(&self) -> Result<Option<i64>, BackendError> {
        let response = self
            .http
            .get(self.config.table_url())
            .headers(self.auth_headers())
            .query(&[("select", "id"), ("order", "id.asc"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        parse_row_id(&body)
    }
}

#[async_trait]
impl ConfigStore for BackendClient {
    async fn read(&self) -> Result<ProfileConfig, BackendError> {
        let response = self
            .http
            .get(self.config.table_url())
            .headers(self.auth_headers())
            .query(&[("select", "data"), ("order", "id.asc"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        parse_config_rows(&body)
    }

    async fn write(&self, config: &ProfileConfig) -> Result<(), BackendError> {
        let row = serde_json::json!({
            "data": config,
            "updated_at": chrono::Utc::now().to_rfc3339(),
        });

        let request = match self.find_row_id().await? {
            Some(id) => {
                info!(id, "updating config row");
                self.http
                    .patch(self.config.table_url())
                    .query(&[("id", format!("eq.{id}"))])
            }
            None => {
                info!("no config row yet, inserting");
                self.http.post(self.config.table_url())
            }
        };

        let response = request
            .headers(self.auth_headers())
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Unwrap the `data` column from a `select=data` response.
pub(crate) fn parse_config_rows(body: &str) -> Result<ProfileConfig, BackendError> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;

    let data = rows
        .into_iter()
        .next()
        .and_then(|mut row| row.get_mut("data").map(serde_json::Value::take))
        .ok_or_else(|| BackendError::Parse("no config row".into()))?;

    serde_json::from_value(data).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Unwrap the `id` column from a `select=id` response.
pub(crate) fn parse_row_id(body: &str) -> Result<Option<i64>, BackendError> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;

    Ok(rows
        .into_iter()
        .next()
        .and_then(|row| row.get("id").and_then(|id| id.as_i64())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_rows_unwraps_data_column() {
        let body = r##"[{"data": {"user": {"username": "dylan"}, "theme": {"profileOpacity": 42}}}]"##;
        let config = parse_config_rows(body).unwrap();
        assert_eq!(config.user.username, "dylan");
        assert_eq!(config.theme.profile_opacity, 42);
    }

    #[test]
    fn parse_config_rows_rejects_empty_result() {
        let err = parse_config_rows("[]").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[test]
    fn parse_config_rows_rejects_non_json() {
        let err = parse_config_rows("<html>504</html>").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[test]
    fn parse_row_id_finds_first_row() {
        assert_eq!(parse_row_id(r#"[{"id": 7}]"#).unwrap(), Some(7));
        assert_eq!(parse_row_id("[]").unwrap(), None);
    }
}
