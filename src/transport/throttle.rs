//! Client-side request pacing.
//!
//! Spreads requests using the token bucket algorithm so a busy caller does
//! not burn through the service's credits. Disabled unless configured.
//!
//! # Example
//!
//! ```rust,ignore
//! let throttle = Throttle::new(&config.rate_limit)?;
//! throttle.acquire().await;
//! ```

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tracing::debug;

use crate::config::RateLimitConfig;
use crate::error::{ImgurError, Result};

type DirectLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared pacing state; clones share one bucket
#[derive(Clone, Default)]
pub struct Throttle {
    limiter: Option<Arc<DirectLimiter>>,
}

impl Throttle {
    /// Create a throttle from configuration
    pub fn new(config: &RateLimitConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let burst = NonZeroU32::new(config.requests_per_window)
            .ok_or_else(|| ImgurError::config("requests_per_window must be greater than zero"))?;
        let period = Duration::from_secs(config.window_seconds) / burst.get();
        let quota = Quota::with_period(period)
            .ok_or_else(|| {
                ImgurError::config(format!(
                    "a {}s window is too short for {} requests",
                    config.window_seconds, config.requests_per_window
                ))
            })?
            .allow_burst(burst);

        debug!(
            requests_per_window = config.requests_per_window,
            window_seconds = config.window_seconds,
            "Request pacing enabled"
        );

        Ok(Self {
            limiter: Some(Arc::new(GovRateLimiter::direct(quota))),
        })
    }

    /// A throttle that never waits
    pub fn disabled() -> Self {
        Self { limiter: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Take a token if one is available right now
    pub fn check(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }

    /// Wait until a token is available, then take it
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
