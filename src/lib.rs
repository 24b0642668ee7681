//! oshi-ranker - Pairwise Elo ranking of favourite characters
//!
//! This crate provides a persistent roster of characters, random matchup
//! selection, Elo rating updates and a session loop that drives any
//! presentation layer.

pub mod config;
pub mod error;
pub mod rating;
pub mod roster;
pub mod session;
pub mod storage;
pub mod types;
pub mod ui;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, RosterError};
pub use types::*;

// Re-export key components
pub use rating::{EloRatingCalculator, RatingCalculator};
pub use roster::RosterStore;
pub use session::{Presenter, Session, SessionEvent};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
