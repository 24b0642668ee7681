//! Rating system configuration

use crate::error::{Result, RosterError};
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};

/// K-factor used when none is configured
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Elo parameters and pairing behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Sensitivity of each update
    pub k_factor: f64,
    /// Rating assigned to newly registered characters
    pub initial_rating: f64,
    /// Fixed seed for the pairing selector; random when unset
    pub pairing_seed: Option<u64>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: DEFAULT_RATING,
            pairing_seed: None,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(RosterError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", self.k_factor),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(RosterError::ConfigurationError {
                message: "Initial rating must be a finite number".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
