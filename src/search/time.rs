//! Wall-clock deadline polling shared by the search driver and
//! quiescence.

use std::time::{Duration, Instant};

pub struct TimeManager {
    start: Instant,
    limit: Option<Duration>,
    expired: bool,
}

impl TimeManager {
    pub fn new(limit: Option<Duration>) -> Self {
        TimeManager {
            start: Instant::now(),
            limit,
            expired: false,
        }
    }

    pub fn unbounded() -> Self {
        TimeManager::new(None)
    }

    /// Polls the deadline; once expired, stays expired for the rest of
    /// this search. No pre-emption, only deadline expiry.
    pub fn poll(&mut self) -> bool {
        if !self.expired {
            if let Some(limit) = self.limit {
                if self.start.elapsed() >= limit {
                    self.expired = true;
                }
            }
        }
        self.expired
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_never_expires() {
        let mut tm = TimeManager::unbounded();
        assert!(!tm.poll());
    }

    #[test]
    fn a_zero_duration_limit_expires_immediately() {
        let mut tm = TimeManager::new(Some(Duration::from_nanos(0)));
        assert!(tm.poll());
    }
}
