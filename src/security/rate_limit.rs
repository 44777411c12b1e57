//! Fixed-window rate limiting keyed by session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Source of monotonic time. Injected so tests can age windows without
/// sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The clock used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Rejected { retry_after_secs: u64 },
}

/// Per-session window state. Owned exclusively by the limiter's store.
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// Fixed-window rate limiter with one independent counter per session.
///
/// The window does not slide: once `time_window_secs` have elapsed since
/// the window opened, the next admission resets the counter. The whole
/// read-modify-write runs under one lock, so concurrent requests for the
/// same session cannot lose updates.
pub struct SessionRateLimiter {
    windows: Mutex<HashMap<String, WindowState>>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl SessionRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    /// Check whether a submission from `session` is admitted, consuming
    /// one attempt when it is. Not idempotent: two calls consume two
    /// attempts.
    pub fn admit(&self, session: &str) -> Admission {
        let now = self.clock.now();
        let window = Duration::from_secs(self.config.time_window_secs);

        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let state = windows.entry(session.to_string()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        let elapsed = now.duration_since(state.window_start);

        if elapsed >= window {
            state.count = 1;
            state.window_start = now;
            Admission::Allowed
        } else if state.count < self.config.max_attempts {
            state.count += 1;
            Admission::Allowed
        } else {
            let remaining = window - elapsed;
            // Round up so the client never retries inside the open window.
            let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            Admission::Rejected { retry_after_secs }
        }
    }

    /// Number of sessions with tracked state. Primarily useful for tests.
    pub fn tracked_sessions(&self) -> usize {
        self.windows.lock().expect("rate limiter mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A clock tests can advance by hand.
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, duration: Duration) {
            *self.now.lock().unwrap() += duration;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn limiter(clock: Arc<ManualClock>) -> SessionRateLimiter {
        SessionRateLimiter::with_clock(
            RateLimitConfig {
                max_attempts: 3,
                time_window_secs: 60,
            },
            clock,
        )
    }

    #[test]
    fn admits_up_to_max_attempts() {
        let limiter = limiter(Arc::new(ManualClock::new()));

        for _ in 0..3 {
            assert_eq!(limiter.admit("session-a"), Admission::Allowed);
        }
    }

    #[test]
    fn rejects_beyond_max_with_positive_retry_after() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(clock.clone());

        for _ in 0..3 {
            limiter.admit("session-a");
        }

        match limiter.admit("session-a") {
            Admission::Rejected { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
                assert!(retry_after_secs <= 60);
            }
            Admission::Allowed => panic!("fourth attempt should be rejected"),
        }
    }

    #[test]
    fn retry_after_shrinks_as_window_ages() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(clock.clone());

        for _ in 0..3 {
            limiter.admit("session-a");
        }

        clock.advance(Duration::from_secs(45));
        assert_eq!(
            limiter.admit("session-a"),
            Admission::Rejected { retry_after_secs: 15 }
        );
    }

    #[test]
    fn window_expiry_resets_counter() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(clock.clone());

        for _ in 0..3 {
            limiter.admit("session-a");
        }
        assert!(matches!(limiter.admit("session-a"), Admission::Rejected { .. }));

        clock.advance(Duration::from_secs(60));
        assert_eq!(limiter.admit("session-a"), Admission::Allowed);

        // The reset consumed one attempt, leaving two in the new window.
        assert_eq!(limiter.admit("session-a"), Admission::Allowed);
        assert_eq!(limiter.admit("session-a"), Admission::Allowed);
        assert!(matches!(limiter.admit("session-a"), Admission::Rejected { .. }));
    }

    #[test]
    fn sessions_are_independent() {
        let limiter = limiter(Arc::new(ManualClock::new()));

        for _ in 0..3 {
            limiter.admit("session-a");
        }
        assert!(matches!(limiter.admit("session-a"), Admission::Rejected { .. }));

        assert_eq!(limiter.admit("session-b"), Admission::Allowed);
        assert_eq!(limiter.tracked_sessions(), 2);
    }

    #[test]
    fn admission_consumes_an_attempt_each_call() {
        let clock = Arc::new(ManualClock::new());
        let limiter = SessionRateLimiter::with_clock(
            RateLimitConfig {
                max_attempts: 1,
                time_window_secs: 60,
            },
            clock,
        );

        assert_eq!(limiter.admit("session-a"), Admission::Allowed);
        assert!(matches!(limiter.admit("session-a"), Admission::Rejected { .. }));
    }
}
