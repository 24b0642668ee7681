//! Presentation port
//!
//! The session never draws anything itself. It hands a [`SessionView`] to a
//! [`Presenter`] after each mutation and reports one-off messages as
//! [`Notice`]s.

use crate::types::{Character, RankingRow, RatingChange};
use serde::{Deserialize, Serialize};

/// The pair currently on screen, resolved to full characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupView {
    pub left: Character,
    pub right: Character,
}

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Characters by rating, best first
    pub ranking: Vec<RankingRow>,
    /// Current matchup; `None` while fewer than two characters exist
    pub matchup: Option<MatchupView>,
}

impl SessionView {
    /// Vote controls are only live when there is a pair to vote on
    pub fn voting_enabled(&self) -> bool {
        self.matchup.is_some()
    }
}

/// One-off messages for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// Every proposed name was already registered
    DuplicateNames { names: Vec<String> },
    Registered { names: Vec<String>, skipped: Vec<String> },
    Removed { id: String },
    VoteRecorded {
        left_name: String,
        right_name: String,
        left: RatingChange,
        right: RatingChange,
    },
    /// A vote arrived while no matchup was on screen
    NeedMoreCharacters,
    ResetDone,
    ResetCancelled,
}

/// Trait for drawing session state and talking to the user
pub trait Presenter {
    /// Draw the ranking table and the matchup panel
    fn render(&mut self, view: &SessionView);

    /// Show a one-off message
    fn notify(&mut self, notice: &Notice);

    /// Ask the user to confirm a full reset
    fn confirm_reset(&mut self) -> bool;
}
