//! Session loop
//!
//! This module wires user events to the roster store and the presentation
//! layer: every event mutates the store, persists, re-picks a matchup and
//! re-renders.

pub mod app;
pub mod presenter;

// Re-export commonly used types
pub use app::{Session, SessionEvent};
pub use presenter::{MatchupView, Notice, Presenter, SessionView};
