//! Rating calculator trait
//!
//! This module defines the interface the roster store uses to turn a vote into
//! new ratings, so the arithmetic can be swapped or mocked independently of
//! the bookkeeping.

use crate::types::MatchOutcome;

/// Trait for calculating rating changes after a vote
#[cfg_attr(test, mockall::automock)]
pub trait RatingCalculator {
    /// Calculate new ratings for a pair based on the vote
    ///
    /// # Arguments
    /// * `rating_a` - Current rating of the left-hand character
    /// * `rating_b` - Current rating of the right-hand character
    /// * `outcome` - Result of the vote, seen from the left-hand side
    ///
    /// # Returns
    /// New ratings for (A, B)
    fn calculate(&self, rating_a: f64, rating_b: f64, outcome: MatchOutcome) -> (f64, f64);

    /// Probability that A beats B
    fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64;

    /// Get the initial rating for new characters
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
