//! Common types used throughout the ranking tool

use serde::{Deserialize, Serialize};

/// Unique identifier for characters
pub type CharacterId = String;

/// Rating every character starts with
pub const DEFAULT_RATING: f64 = 1000.0;

/// A registered character and its running record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub rating: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
}

impl Character {
    /// Create a fresh character with no games played
    pub fn new(id: CharacterId, name: impl Into<String>, rating: f64) -> Self {
        Self {
            id,
            name: name.into(),
            rating,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Total number of votes this character took part in
    pub fn games_played(&self) -> u32 {
        self.wins
            .saturating_add(self.losses)
            .saturating_add(self.draws)
    }
}

/// The persisted document: every registered character in registration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterState {
    pub characters: Vec<Character>,
}

/// Result of a single vote, seen from the left-hand (A) side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    AWins,
    BWins,
    Draw,
}

impl MatchOutcome {
    /// Scores for (A, B): 1/0 for a decisive result, 0.5 each for a draw
    pub fn scores(self) -> (f64, f64) {
        match self {
            MatchOutcome::AWins => (1.0, 0.0),
            MatchOutcome::BWins => (0.0, 1.0),
            MatchOutcome::Draw => (0.5, 0.5),
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::AWins => write!(f, "left wins"),
            MatchOutcome::BWins => write!(f, "right wins"),
            MatchOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// The pair currently up for a vote
///
/// Holds ids rather than references so the roster stays mutable while a
/// matchup is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub left: CharacterId,
    pub right: CharacterId,
}

/// Rating change information for one side of a vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub character_id: CharacterId,
    pub old_rating: f64,
    pub new_rating: f64,
}

impl RatingChange {
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// One line of the ranking table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    pub id: CharacterId,
    pub name: String,
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}
