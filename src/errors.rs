//! Error types for the notekeep application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during note management operations.

use std::io;

use thiserror::Error;

use crate::NoteId;

/// The main error type for the notekeep application.
#[derive(Error, Debug)]
pub enum KeepError {
    /// Create was called with nothing worth saving.
    #[error("nothing to save: both title and content are empty")]
    EmptyNote,

    /// Note was not found when performing an operation.
    #[error("note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to configuration.
    #[error("configuration error: {message}")]
    ConfigError { message: String },
}
