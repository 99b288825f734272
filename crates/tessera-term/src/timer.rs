// SPDX-License-Identifier: MIT
//
// Named countdown timers.
//
// A timer is armed with a length and polled with `is_expired`, which fires
// at most once per arming. Nothing runs in the background; expiry is only
// noticed when somebody asks.

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct Timer {
    started: Instant,
    length: Duration,
    enabled: bool,
}

/// A set of timers keyed by alias.
#[derive(Debug, Default)]
pub struct Timers {
    timers: HashMap<String, Timer>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the timer `alias`, starting its clock now.
    pub fn set(&mut self, alias: &str, length: Duration, enabled: bool) {
        trace!(alias, ?length, enabled, "timer set");
        self.timers.insert(
            alias.to_owned(),
            Timer {
                started: Instant::now(),
                length,
                enabled,
            },
        );
    }

    /// Restart the clock of `alias` and enable it.
    ///
    /// # Panics
    ///
    /// Panics if no timer named `alias` exists.
    pub fn start(&mut self, alias: &str) {
        let Some(timer) = self.timers.get_mut(alias) else {
            panic!("timer '{alias}' does not exist");
        };
        timer.started = Instant::now();
        timer.enabled = true;
    }

    /// Whether `alias` has run past its length.
    ///
    /// Reports `true` once and disables the timer; call [`start`](Self::start)
    /// to arm it again. Unknown and disabled timers never expire.
    pub fn is_expired(&mut self, alias: &str) -> bool {
        let Some(timer) = self.timers.get_mut(alias) else {
            return false;
        };
        if timer.enabled && timer.started.elapsed() > timer.length {
            timer.enabled = false;
            trace!(alias, "timer expired");
            return true;
        }
        false
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.timers.contains_key(alias)
    }

    /// Forget `alias`. Returns whether it existed.
    pub fn remove(&mut self, alias: &str) -> bool {
        self.timers.remove(alias).is_some()
    }
}

/// Block the calling thread for `ms` milliseconds.
pub fn sleep_ms(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

/// Block the calling thread for `secs` seconds.
pub fn sleep_secs(secs: u64) {
    thread::sleep(Duration::from_secs(secs));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_then_rearms() {
        let mut timers = Timers::new();
        timers.set("blink", Duration::ZERO, true);
        sleep_ms(2);
        assert!(timers.is_expired("blink"));
        assert!(!timers.is_expired("blink"));

        timers.start("blink");
        sleep_ms(2);
        assert!(timers.is_expired("blink"));
    }

    #[test]
    fn disabled_and_unknown_never_expire() {
        let mut timers = Timers::new();
        timers.set("idle", Duration::ZERO, false);
        sleep_ms(2);
        assert!(!timers.is_expired("idle"));
        assert!(!timers.is_expired("missing"));
    }

    #[test]
    fn long_timer_is_not_expired_yet() {
        let mut timers = Timers::new();
        timers.set("later", Duration::from_secs(3600), true);
        assert!(!timers.is_expired("later"));
    }

    #[test]
    fn remove_forgets() {
        let mut timers = Timers::new();
        timers.set("t", Duration::ZERO, true);
        assert!(timers.contains("t"));
        assert!(timers.remove("t"));
        assert!(!timers.remove("t"));
        assert!(!timers.contains("t"));
    }

    #[test]
    #[should_panic(expected = "timer 'ghost' does not exist")]
    fn start_unknown_panics() {
        Timers::new().start("ghost");
    }
}
