//! Core data structures for the notekeep application.
//!
//! This module contains the primary types used throughout the application,
//! the Note entity and its Category grouping.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title substituted when the user supplies no title of their own.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Identifier assigned to a note at creation, immutable afterwards.
pub type NoteId = u64;

/// Coarse grouping label used to narrow the visible set of notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    Ideas,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Ideas => "ideas",
            Category::Other => "other",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Category::Personal),
            "work" => Ok(Category::Work),
            "ideas" => Ok(Category::Ideas),
            "other" => Ok(Category::Other),
            other => Err(format!(
                "unknown category '{other}', expected one of: personal, work, ideas, other"
            )),
        }
    }
}

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note
    pub id: NoteId,
    /// Note title, never empty
    pub title: String,
    /// Free-text body, may be empty
    pub content: String,
    /// Grouping label
    pub category: Category,
    /// Completion state
    pub completed: bool,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with the given id, title, and content.
    ///
    /// Both text fields are trimmed; an empty title is replaced with
    /// [`DEFAULT_TITLE`]. Timestamps start out equal.
    pub(crate) fn new(id: NoteId, title: &str, content: &str, category: Category) -> Self {
        let now = Utc::now();
        let title = title.trim();

        Note {
            id,
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title.to_string()
            },
            content: content.trim().to_string(),
            category,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}
