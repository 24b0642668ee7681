//! Roster management
//!
//! This module owns the registered characters: parsing names from free-text
//! input, picking matchups, and the store that applies votes and persists the
//! roster through a key-value slot.

pub mod names;
pub mod pairing;
pub mod store;

// Re-export commonly used types
pub use names::parse_names;
pub use pairing::pick;
pub use store::{AddReport, RosterStore};
