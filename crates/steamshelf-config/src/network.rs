//! Network tuning

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Network settings shared by every remote fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Pause between per-game enrichment requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_request_delay_ms() -> u64 {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NetworkConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Request timeout, never zero
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_clamped() {
        let net = NetworkConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(net.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let net: NetworkConfig = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(net.timeout_secs, 5);
        assert_eq!(net.request_delay(), Duration::from_millis(50));
    }
}
