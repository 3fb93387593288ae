use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for establishing database connections at startup
///
/// The delay doubles after every failed attempt up to `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Randomize each delay to between 50% and 100% of its nominal value
    pub jitter: bool,
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        delay.saturating_mul(2).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

/// Retry an async operation with exponential backoff
///
/// The last error is returned once `max_retries` retries have failed.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        let error = match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(retries = attempt, "Operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(e) => e,
        };

        attempt += 1;
        if attempt > config.max_retries {
            warn!("Operation failed after {} attempts: {}", attempt, error);
            return Err(error);
        }

        let wait = if config.jitter { apply_jitter(delay) } else { delay };
        debug!(
            "Attempt {}/{} failed: {}. Retrying in {:?}",
            attempt, config.max_retries, error, wait
        );

        tokio::time::sleep(wait).await;
        delay = config.next_delay(delay);
    }
}

fn apply_jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    // 50..=99 percent
    let percent = RandomState::new().hash_one(std::time::SystemTime::now()) % 50 + 50;
    delay.mul_f64(percent as f64 / 100.0)
}
