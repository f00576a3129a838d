//! Media upload into the public storage bucket.

use tracing::info;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::BackendError;

/// Client for the hosted backend's object storage.
pub struct StorageClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl StorageClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Upload a blob into the public bucket and return its public URL.
    ///
    /// `path_hint` is the admin-chosen location, e.g. `avatars/pfp.png`;
    /// the stored object name gets a uuid prefix so re-uploads never
    /// collide with a cached predecessor.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        path_hint: &str,
    ) -> Result<String, BackendError> {
        let key = object_key(path_hint);
        info!(key = %key, size = bytes.len(), "uploading object");

        let response = self
            .http
            .post(self.config.object_url(&key))
            .header("apikey", self.config.api_key.as_str())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
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

        Ok(self.config.public_object_url(&key))
    }
}

/// Build the stored object key from the caller's path hint.
///
/// The directory part is kept, the file name gets a uuid prefix.
pub(crate) fn object_key(path_hint: &str) -> String {
    let hint = path_hint.trim_matches('/');
    let unique = Uuid::new_v4();
    match hint.rsplit_once('/') {
        Some((dir, file)) if !file.is_empty() => format!("{dir}/{unique}-{file}"),
        _ => format!("{unique}-{hint}"),
    }
}
