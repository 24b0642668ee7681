//! Utility functions for the ranking tool

use crate::types::CharacterId;
use uuid::Uuid;

/// Number of id characters shown in the ranking table
pub const SHORT_ID_LEN: usize = 8;

/// Generate a new unique character ID
pub fn generate_character_id() -> CharacterId {
    Uuid::new_v4().simple().to_string()
}

/// Abbreviate an id for display
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Round to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
