use crate::config::AppConfig;
use std::time::Duration;

/// Lower bound so a zero setting cannot spin the event loop
pub const MIN_TICK_MS: u64 = 16;

/// Get tick duration
pub fn tick_duration(config: &AppConfig) -> Duration {
    Duration::from_millis(config.tick_ms.max(MIN_TICK_MS))
}
