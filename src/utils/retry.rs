use crate::error::{AppError, AppResult};
use log::{debug, info, warn};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

pub async fn retry_with_exponential_backoff<T, F, Fut>(
    config: &RetryConfig,
    operation: F,
) -> AppResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut delay = config.base_delay;
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("Request succeeded on attempt {}", attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                warn!("Request failed after {} attempts: {}", max_attempts, e);
                return Err(e);
            }
            Err(e) if is_transient_error(&e) => {
                debug!("Attempt {} failed transiently, retrying in {:?}: {}", attempt, delay, e);
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(
                    Duration::from_millis((delay.as_millis() as f64 * config.backoff_multiplier) as u64),
                    config.max_delay,
                );
                attempt += 1;
            }
            Err(e) => {
                debug!("Attempt {} failed with non-transient error, not retrying: {}", attempt, e);
                return Err(e);
            }
        }
    }
}

/// Timeouts, dropped connections, rate limiting and gateway errors.
pub fn is_transient_error(error: &AppError) -> bool {
    match error {
        AppError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        AppError::Api { status, .. } => matches!(status, 429 | 502 | 503 | 504),
        _ => false,
    }
}
