//! Shared type aliases and the CLI command surface.
use clap::Subcommand;

use crate::{Category, CategoryFilter, KeepError, NoteId, OutputFormat, Theme};

/// A specialized Result type for notekeep operations.
pub type Result<T> = std::result::Result<T, KeepError>;

/// Available subcommands for the notekeep application
#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note
    Add {
        /// Title of the note; left empty it becomes "Untitled"
        #[clap(short = 'T', long, default_value = "")]
        title: String,

        /// Content of the note
        #[clap(short, long, default_value = "")]
        content: String,

        /// Category for the note (personal, work, ideas, other)
        #[clap(short = 'g', long)]
        category: Option<Category>,
    },

    /// List notes with optional filtering
    List {
        /// Restrict to one category, or "all"
        #[clap(short = 'g', long, default_value = "all")]
        category: CategoryFilter,

        /// Keep only notes whose title or content contains this text
        #[clap(short, long)]
        search: Option<String>,

        /// Output format (text, json, html)
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,

        /// Limit the number of notes returned (0 means no limit)
        #[clap(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Only show ids, titles, and state
        #[clap(short, long)]
        brief: bool,
    },

    /// Search notes by title or content, ranked by relevance
    Search {
        /// Search query text
        query: String,

        /// Limit the number of search results (0 means no limit)
        #[clap(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Output format (text, json, html)
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle a note's completion state
    Toggle {
        /// ID of the note to toggle
        id: NoteId,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: NoteId,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// New category for the note
        #[clap(short = 'g', long)]
        category: Option<Category>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: NoteId,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Toggle the color theme, or set it explicitly
    Theme {
        /// Set the theme instead of toggling (light, dark)
        #[clap(short, long)]
        set: Option<Theme>,
    },
}
