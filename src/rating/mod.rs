//! Rating system integration using the Elo algorithm
//!
//! This module provides the rating calculator interface and the Elo
//! implementation backed by the skillratings crate.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::EloRatingCalculator;
