use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    last_seen: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    /// `None` while a previous accepted submission is inside the window.
    pub fn reserve<'a>(&'a self, key: &str, now: Instant) -> Option<Reservation<'a>> {
        let mut last_seen = self.lock();

        if let Some(previous) = last_seen.get(key) {
            if now.saturating_duration_since(*previous) < self.window {
                return None;
            }
        }

        last_seen.retain(|_, seen| now.saturating_duration_since(*seen) < self.window);
        last_seen.insert(key.to_string(), now);
        Some(Reservation {
            limiter: self,
            key: key.to_string(),
            at: now,
            committed: false,
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        match self.last_seen.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn release(&self, key: &str, at: Instant) {
        let mut last_seen = self.lock();
        if last_seen.get(key) == Some(&at) {
            last_seen.remove(key);
        }
    }
}

#[derive(Debug)]
pub struct Reservation<'a> {
    limiter: &'a RateLimiter,
    key: String,
    at: Instant,
    committed: bool,
}

impl Reservation<'_> {
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.limiter.release(&self.key, self.at);
        }
    }
}
