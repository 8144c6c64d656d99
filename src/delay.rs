//! Pauses inserted between detail requests.
//!
//! The scraper asks its [`DelayPolicy`] for a duration before every detail
//! fetch and sleeps that long. Production runs use [`RandomDelay`]; tests
//! inject [`NoDelay`] or their own recording policy.

use rand::{Rng, rng};
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Decides how long to wait before the next request.
pub trait DelayPolicy: Send + Sync + fmt::Debug {
    fn next_delay(&self) -> Duration;
}

/// Uniformly random delay in the inclusive interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "delay lower bound {:?} exceeds upper bound {:?}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }
}

impl Default for RandomDelay {
    /// One to three seconds.
    fn default() -> Self {
        Self {
            min: Duration::from_secs(1),
            max: Duration::from_secs(3),
        }
    }
}

impl DelayPolicy for RandomDelay {
    fn next_delay(&self) -> Duration {
        let span = self.max - self.min;
        let fraction: f64 = rng().random_range(0.0..=1.0);
        // f64 rounding of span can overshoot by a nanosecond
        (self.min + span.mul_f64(fraction)).min(self.max)
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl DelayPolicy for NoDelay {
    fn next_delay(&self) -> Duration {
        Duration::ZERO
    }
}
