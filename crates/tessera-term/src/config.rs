// SPDX-License-Identifier: MIT
//
// Session configuration.

use std::time::Duration;

/// Screen size and input timing for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Screen width in cells.
    pub width: u16,
    /// Screen height in cells.
    pub height: u16,
    /// How long a widget loop sleeps when no input is queued.
    pub poll_interval: Duration,
    /// How long the input pump waits on its source per poll.
    pub pump_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 25,
            poll_interval: Duration::from_millis(10),
            pump_timeout: Duration::from_millis(50),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_pump_timeout(mut self, timeout: Duration) -> Self {
        self.pump_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_a_classic_console() {
        let config = SessionConfig::default();
        assert_eq!((config.width, config.height), (80, 25));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
    }

    #[test]
    fn builders_override_timing_only() {
        let config = SessionConfig::new(40, 10)
            .with_poll_interval(Duration::ZERO)
            .with_pump_timeout(Duration::from_millis(1));
        assert_eq!(
            config,
            SessionConfig {
                width: 40,
                height: 10,
                poll_interval: Duration::ZERO,
                pump_timeout: Duration::from_millis(1),
            }
        );
    }
}
