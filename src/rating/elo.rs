//! Elo rating system implementation
//!
//! This module provides a concrete implementation of the rating calculator
//! using the Elo algorithm from the skillratings crate. New ratings are
//! rounded to whole points, ties rounding up.

use crate::config::RatingConfig;
use crate::rating::calculator::RatingCalculator;
use crate::types::MatchOutcome;
use crate::utils::round_half_up;
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;
use tracing::debug;

impl From<MatchOutcome> for Outcomes {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::AWins => Outcomes::WIN,
            MatchOutcome::BWins => Outcomes::LOSS,
            MatchOutcome::Draw => Outcomes::DRAW,
        }
    }
}

/// Elo rating calculator implementation
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    elo_config: EloConfig,
    initial_rating: f64,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: &RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self {
            elo_config: EloConfig {
                k: config.k_factor,
            },
            initial_rating: config.initial_rating,
        })
    }

    /// The K-factor in use
    pub fn k_factor(&self) -> f64 {
        self.elo_config.k
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            elo_config: EloConfig {
                k: config.k_factor,
            },
            initial_rating: config.initial_rating,
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate(&self, rating_a: f64, rating_b: f64, outcome: MatchOutcome) -> (f64, f64) {
        let (new_a, new_b) = elo(
            &EloRating { rating: rating_a },
            &EloRating { rating: rating_b },
            &outcome.into(),
            &self.elo_config,
        );

        let rounded = (round_half_up(new_a.rating), round_half_up(new_b.rating));
        debug!(
            "Elo update ({}): {} vs {} -> {} vs {}",
            outcome, rating_a, rating_b, rounded.0, rounded.1
        );
        rounded
    }

    fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        expected_score(
            &EloRating { rating: rating_a },
            &EloRating { rating: rating_b },
        )
        .0
    }

    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.elo_config.k,
            "initial_rating": self.initial_rating,
            "rounding": "half_up"
        })
    }
}
