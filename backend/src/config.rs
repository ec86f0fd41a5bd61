//! Scheduler configuration
//!
//! Two kinds of settings reach the scheduler:
//! - [`SchedulerConfig`]: tuning fixed for the scheduler's lifetime, given to
//!   [`InstrumentScheduler::new`](crate::scheduler::InstrumentScheduler::new)
//! - [`SessionSettings`]: player-owned session state (automatic mode), passed
//!   in on every tick so the scheduler never holds global switches

use crate::valuation::DEFAULT_NEAR_CAP_EPSILON;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cooldown applied when an instrument is reset because its data is worthless
pub const DEFAULT_WORTHLESS_RESET_COOLDOWN: f64 = 5.0;

/// Errors raised while validating configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid reset cooldown {0}: must be finite and non-negative")]
    InvalidCooldown(f64),

    #[error("Invalid near-cap epsilon {0}: must be finite and non-negative")]
    InvalidEpsilon(f64),
}

/// Tuning for automatic mode
///
/// # Example
///
/// ```
/// use science_manager_core::SchedulerConfig;
///
/// let config = SchedulerConfig::default();
/// assert_eq!(config.worthless_reset_cooldown, 5.0);
/// assert_eq!(config.near_cap_epsilon, 0.01);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Time an instrument holding worthless data waits after reset before redeploying
    pub worthless_reset_cooldown: f64,

    /// Subjects this close to their cap count as exhausted for transmission
    pub near_cap_epsilon: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worthless_reset_cooldown: DEFAULT_WORTHLESS_RESET_COOLDOWN,
            near_cap_epsilon: DEFAULT_NEAR_CAP_EPSILON,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.worthless_reset_cooldown.is_finite() || self.worthless_reset_cooldown < 0.0 {
            return Err(ConfigError::InvalidCooldown(self.worthless_reset_cooldown));
        }
        if !self.near_cap_epsilon.is_finite() || self.near_cap_epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.near_cap_epsilon));
        }
        Ok(())
    }
}

/// Session state owned by the overlay, read by the scheduler each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Whether the scheduler drives instruments on its own
    pub auto_mode: bool,
}

impl SessionSettings {
    pub fn automatic() -> Self {
        Self { auto_mode: true }
    }

    pub fn manual() -> Self {
        Self { auto_mode: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_cooldown_rejected() {
        let config = SchedulerConfig {
            worthless_reset_cooldown: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCooldown(-1.0)));
    }

    #[test]
    fn test_nan_epsilon_rejected() {
        let config = SchedulerConfig {
            near_cap_epsilon: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidEpsilon(_))));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{ "worthless_reset_cooldown": 2.5 }"#).unwrap();
        assert_eq!(config.worthless_reset_cooldown, 2.5);
        assert_eq!(config.near_cap_epsilon, DEFAULT_NEAR_CAP_EPSILON);
    }
}
