use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Small epsilon to avoid fp surprises
    fn try_consume(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whole seconds until the next token is available.
    fn retry_after(&self) -> u64 {
        let missing = (1.0 - self.tokens).max(0.0);
        ((missing / self.refill_per_sec).ceil() as u64).max(1)
    }
}

#[derive(Debug)]
struct ClientBucket {
    bucket: TokenBucket,
    last_seen: Instant,
}

/// Per-client limiter guarding the submission endpoints.
#[derive(Clone)]
pub struct SubmissionLimiter {
    map: Arc<DashMap<String, Arc<Mutex<ClientBucket>>>>,
    capacity: f64,
    refill_per_sec: f64,
}

impl SubmissionLimiter {
    pub fn new(burst: u32, refill_per_minute: u32) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            capacity: f64::from(burst.max(1)),
            refill_per_sec: f64::from(refill_per_minute.max(1)) / 60.0,
        }
    }

    fn get_bucket(&self, key: &str) -> Arc<Mutex<ClientBucket>> {
        self.map
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ClientBucket {
                    bucket: TokenBucket::new(self.capacity, self.refill_per_sec),
                    last_seen: Instant::now(),
                }))
            })
            .clone()
    }

    /// `Err(retry_after_secs)` when the client has used up its burst.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        let bucket = self.get_bucket(key);
        let mut client = bucket.lock();
        let now = Instant::now();
        client.last_seen = now;

        if client.bucket.try_consume(now) {
            Ok(())
        } else {
            Err(client.bucket.retry_after())
        }
    }

    /// Drops clients not seen for `ttl`, returning how many were removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map
            .retain(|_, client| now.duration_since(client.lock().last_seen) <= ttl);
        before.saturating_sub(self.map.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}
