use serde::{Deserialize, Serialize};

/// Session-level configuration (timing thresholds and feature toggles).
/// Passed into session construction and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minimum gap between pause actions in microseconds.
    #[serde(default = "default_pause_cooldown_us")]
    pub pause_cooldown_us: i64,
    /// Lead-in length below which no skip affordance is offered (microseconds).
    #[serde(default = "default_skip_cutoff_us")]
    pub skip_cutoff_us: i64,
    /// Fade margin kept after a skip seek (microseconds).
    #[serde(default = "default_skip_fade_us")]
    pub skip_fade_us: i64,
    /// Settle delay between completion and the results hand-off (microseconds).
    #[serde(default = "default_completion_settle_us")]
    pub completion_settle_us: i64,
    /// Whether the skip affordance may be offered at all.
    #[serde(default = "default_skip_enabled")]
    pub skip_enabled: bool,
}

fn default_pause_cooldown_us() -> i64 {
    1_000_000
}

fn default_skip_cutoff_us() -> i64 {
    3_000_000
}

fn default_skip_fade_us() -> i64 {
    300_000
}

fn default_completion_settle_us() -> i64 {
    1_000_000
}

fn default_skip_enabled() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pause_cooldown_us: default_pause_cooldown_us(),
            skip_cutoff_us: default_skip_cutoff_us(),
            skip_fade_us: default_skip_fade_us(),
            completion_settle_us: default_completion_settle_us(),
            skip_enabled: default_skip_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.pause_cooldown_us, 1_000_000);
        assert_eq!(config.skip_cutoff_us, 3_000_000);
        assert_eq!(config.skip_fade_us, 300_000);
        assert!(config.skip_enabled);
    }

    #[test]
    fn config_deserializes_with_missing_fields() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.pause_cooldown_us, 1_000_000);
        assert!(config.skip_enabled);
    }

    #[test]
    fn config_roundtrip() {
        let mut config = SessionConfig::default();
        config.skip_enabled = false;
        config.pause_cooldown_us = 2_500_000;

        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pause_cooldown_us, 2_500_000);
        assert!(!back.skip_enabled);
    }
}
