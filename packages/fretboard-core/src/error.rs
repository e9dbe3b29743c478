//! # Error Types
//!
//! This module defines the error type for the fretboard engine.
//!
//! Gameplay itself never fails: commands that do not fit the current state are
//! dropped and corrupt ranking data reads as an empty list. Errors only come out of
//! construction (catalogs, configuration) and out of storage adapters.
//!
//! ## Error Types
//! - `InvalidTuning` - A catalog was requested with no strings or no frets
//! - `UnknownPitch` - A pitch name such as `"H2"` could not be parsed
//! - `InvalidConfig` - A configuration value is out of range or the YAML is malformed
//! - `Storage` - A storage adapter could not read or write a key
//! - `Audio` - The audio collaborator could not play a tone (always swallowed by the session)
//! - `Serialization` - Ranking data could not be encoded (logged by the ranking store)
//!
//! ## Usage
//! ```rust
//! use fretboard::{GameConfig, FretboardError};
//!
//! match GameConfig::from_yaml("time_budget_secs: 0") {
//!     Ok(config) => println!("{} seconds", config.time_budget_secs),
//!     Err(FretboardError::InvalidConfig(message)) => eprintln!("{}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FretboardError {
    /// The tuning cannot produce a playable fretboard.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::InvalidTuning("at least one string is required".to_string());
    /// assert_eq!(err.to_string(), "Invalid tuning: at least one string is required");
    /// ```
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// A pitch name did not parse.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::UnknownPitch("H2".to_string());
    /// assert_eq!(err.to_string(), "Unknown pitch: H2");
    /// ```
    #[error("Unknown pitch: {0}")]
    UnknownPitch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Audio playback failed: {0}")]
    Audio(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_convert_to_serialization() {
        let json_error = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: FretboardError = json_error.into();
        assert!(matches!(err, FretboardError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
