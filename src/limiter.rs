use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Minimum-interval limiter, keyed per route and managed as Rocket state.
/// Constructed without an interval it admits everything.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Option<Duration>,
    last_hit: Mutex<HashMap<&'static str, Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            last_hit: Mutex::new(HashMap::new()),
        }
    }

    /// Records a hit for `route` and reports whether it is admitted.
    /// A hit arriving within the configured interval of the previous
    /// admitted one is rejected and does not reset the window.
    pub fn try_acquire(&self, route: &'static str) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };

        let mut last_hit = self
            .last_hit
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();

        match last_hit.get(route) {
            Some(previous) if now.duration_since(*previous) < interval => false,
            _ => {
                last_hit.insert(route, now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_limiter_always_admits() {
        let limiter = RateLimiter::new(None);
        for _ in 0..10 {
            assert!(limiter.try_acquire("increment-user"));
        }
    }

    #[test]
    fn rejects_inside_window_and_recovers_after() {
        let limiter = RateLimiter::new(Some(Duration::from_millis(40)));

        assert!(limiter.try_acquire("increment-user"));
        assert!(!limiter.try_acquire("increment-user"));

        std::thread::sleep(Duration::from_millis(60));
        assert!(limiter.try_acquire("increment-user"));
    }

    #[test]
    fn routes_are_limited_independently() {
        let limiter = RateLimiter::new(Some(Duration::from_secs(60)));

        assert!(limiter.try_acquire("increment-user"));
        assert!(limiter.try_acquire("update-leaderboard"));
        assert!(!limiter.try_acquire("increment-user"));
    }
}
