//! Live update (WebSocket) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tuning for live sessions and broadcasts
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LiveConfig {
    /// Upper bound for queuing one frame on one session
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Frames buffered per session before sends start waiting
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Seconds between transport pings
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_secs: u64,

    /// Seconds of client silence before the connection is closed
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl LiveConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.send_timeout_ms == 0 || self.send_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidSendTimeout);
        }
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        if self.heartbeat_interval_secs == 0 {
            return Err(ValidationError::InvalidHeartbeatInterval);
        }
        if self.idle_timeout_secs <= self.heartbeat_interval_secs {
            return Err(ValidationError::IdleTimeoutTooShort);
        }
        Ok(())
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            send_timeout_ms: default_send_timeout_ms(),
            channel_capacity: default_channel_capacity(),
            heartbeat_interval_secs: default_heartbeat_interval(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn default_send_timeout_ms() -> u64 {
    2000
}

fn default_channel_capacity() -> usize {
    64
}

fn default_heartbeat_interval() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LiveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.send_timeout(), Duration::from_secs(2));
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(30));
        assert_eq!(config.idle_timeout(), Duration::from_secs(90));
    }

    #[test]
    fn send_timeout_must_be_bounded() {
        for ms in [0, 60_001] {
            let config = LiveConfig {
                send_timeout_ms: ms,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidSendTimeout));
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = LiveConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChannelCapacity));
    }

    #[test]
    fn idle_timeout_must_exceed_heartbeat() {
        let config = LiveConfig {
            heartbeat_interval_secs: 30,
            idle_timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::IdleTimeoutTooShort));

        let config = LiveConfig {
            heartbeat_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidHeartbeatInterval));
    }
}
