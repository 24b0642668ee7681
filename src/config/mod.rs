//! Configuration management for the ranking tool
//!
//! This module handles all configuration loading from environment variables
//! or TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StorageBackend, StorageSettings};
pub use rating::RatingConfig;
