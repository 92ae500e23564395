use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::SubmissionLimiter;

/// Periodically drops limiter buckets for clients that have gone quiet.
pub async fn start_limiter_eviction_task(limiter: SubmissionLimiter, idle_ttl: Duration) {
    let mut interval = interval(Duration::from_secs(60 * 5));

    loop {
        interval.tick().await;

        let evicted = limiter.evict_idle(idle_ttl);
        if evicted > 0 {
            tracing::info!("Evicted {} idle rate limit buckets", evicted);
        } else {
            tracing::debug!("No idle rate limit buckets to evict");
        }
    }
}
