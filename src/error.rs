//! Error types for the ranking tool
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific roster scenarios
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("All proposed names are already registered: {}", names.join(", "))]
    AllDuplicates { names: Vec<String> },

    #[error("Character not found: {id}")]
    CharacterNotFound { id: String },

    #[error("A character cannot be matched against itself: {id}")]
    InvalidMatchup { id: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
