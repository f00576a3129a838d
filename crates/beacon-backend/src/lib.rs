//! Hosted-backend access for beacon.
//!
//! The profile document lives in a single row of a hosted Postgres-over-REST
//! backend (Supabase-style); uploaded media lands in a public storage bucket.
//! This crate wraps both behind small typed clients. The admin layer talks
//! to the [`ConfigStore`] trait so tests and previews can substitute an
//! in-memory store.

pub mod client;
pub mod config;
pub mod storage;

pub use client::{BackendClient, ConfigStore};
pub use config::BackendConfig;
pub use storage::StorageClient;

/// Errors from the hosted backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Network(err.to_string())
    }
}

impl From<BackendError> for beacon_common::BeaconError {
    fn from(err: BackendError) -> Self {
        beacon_common::BeaconError::Backend(err.to_string())
    }
}
