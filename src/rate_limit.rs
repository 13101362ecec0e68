use std::time::{Duration, Instant};

use dashmap::DashMap;

const MAX_FAILURES: u32 = 5;
const WINDOW: Duration = Duration::from_secs(15 * 60);
/// Map size above which expired windows are swept on the next failure.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Attempts {
    failures: u32,
    window_start: Instant,
}

impl Attempts {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.window_start) > WINDOW
    }
}

/// Failed logins per lowercased email inside a fixed 15 minute window.
pub struct LoginRateLimiter {
    entries: DashMap<String, Attempts>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// `Err` carries the seconds left until the window reopens.
    /// Checking never counts as an attempt. Call `record_failure` after a rejected login.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let now = Instant::now();
        match self.entries.get(&email.to_lowercase()) {
            Some(entry) if !entry.expired(now) && entry.failures >= MAX_FAILURES => {
                let elapsed = now.duration_since(entry.window_start);
                Err(WINDOW.saturating_sub(elapsed).as_secs())
            }
            _ => Ok(()),
        }
    }

    /// Count a failed login, whether or not the email exists.
    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();
        if self.entries.len() > PRUNE_THRESHOLD {
            self.prune_expired(now);
        }

        let fresh = Attempts {
            failures: 1,
            window_start: now,
        };
        self.entries
            .entry(email.to_lowercase())
            .and_modify(|attempts| {
                if attempts.expired(now) {
                    *attempts = fresh;
                } else {
                    attempts.failures += 1;
                }
            })
            .or_insert(fresh);
    }

    fn prune_expired(&self, now: Instant) {
        self.entries.retain(|_, attempts| !attempts.expired(now));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_five_failures() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..MAX_FAILURES {
            assert!(limiter.check("a@b.com").is_ok());
            limiter.record_failure("a@b.com");
        }
        assert!(limiter.check("a@b.com").is_err());
        assert!(limiter.check("A@B.com").is_err());
        assert!(limiter.check("other@b.com").is_ok());
    }

    #[test]
    fn expired_windows_are_pruned() {
        let limiter = LoginRateLimiter::new();
        let now = Instant::now();
        let Some(stale) = now.checked_sub(WINDOW * 2) else {
            return;
        };

        for i in 0..10 {
            limiter.entries.insert(
                format!("old{i}@b.com"),
                Attempts {
                    failures: MAX_FAILURES,
                    window_start: stale,
                },
            );
        }
        limiter.record_failure("fresh@b.com");
        assert_eq!(limiter.len(), 11);

        limiter.prune_expired(now);
        assert_eq!(limiter.len(), 1);
        assert!(limiter.check("old0@b.com").is_ok());
        assert!(limiter.check("fresh@b.com").is_ok());
    }

    #[test]
    fn sweep_runs_once_the_map_is_large() {
        let limiter = LoginRateLimiter::new();
        let Some(stale) = Instant::now().checked_sub(WINDOW * 2) else {
            return;
        };

        for i in 0..=PRUNE_THRESHOLD {
            limiter.entries.insert(
                format!("user{i}@b.com"),
                Attempts {
                    failures: 1,
                    window_start: stale,
                },
            );
        }
        limiter.record_failure("trigger@b.com");
        assert_eq!(limiter.len(), 1);
    }
}
