//! Configuration for the presence client.

use std::time::Duration;

/// Default presence gateway endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "wss://api.lanyard.rest/socket";

/// Configuration for the presence client.
#[derive(Debug, Clone)]
pub struct PresenceConfig {
    /// Gateway websocket endpoint.
    pub gateway_url: String,
    /// Fixed delay before every reconnect attempt (no backoff growth).
    pub reconnect_delay: Duration,
    /// Dial timeout for one connection attempt.
    pub connect_timeout: Duration,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.into(),
            reconnect_delay: Duration::from_millis(5000),
            connect_timeout: Duration::from_secs(15),
        }
    }
}
