//! Error handling for StudyBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for StudyBuddy application
#[derive(Error, Debug)]
pub enum StudyBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Student not found: {id}")]
    StudentNotFound { id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for StudyBuddy operations
pub type Result<T> = std::result::Result<T, StudyBuddyError>;

impl StudyBuddyError {
    /// Check if the error is recoverable.
    ///
    /// Validation errors re-prompt the user at the same step; everything else
    /// terminates the active flow.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StudyBuddyError::Database(_) => false,
            StudyBuddyError::Migration(_) => false,
            StudyBuddyError::Telegram(_) => true,
            StudyBuddyError::Config(_) => false,
            StudyBuddyError::StudentNotFound { .. } => false,
            StudyBuddyError::InvalidStateTransition { .. } => false,
            StudyBuddyError::Validation(_) => true,
            StudyBuddyError::Serialization(_) => false,
            StudyBuddyError::Io(_) => true,
            StudyBuddyError::InvalidInput(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_recoverable() {
        let err = StudyBuddyError::Validation("age must be a number".to_string());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_not_found_is_terminal() {
        let err = StudyBuddyError::StudentNotFound { id: 42 };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Student not found: 42");
    }
}
