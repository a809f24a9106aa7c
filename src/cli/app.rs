//! CLI module for the notekeep application
//!
//! This module translates parsed subcommands into note store operations and
//! renders the results. User actions arrive here as discrete commands; no
//! knowledge of the terminal surface leaks into the data logic.
use std::io::{stdin, stdout, Write};

use log::debug;

use crate::{
    render_notes, Category, CategoryFilter, Commands, Config, KeepError, Note, NoteId, NoteStore,
    OutputFormat, Result, SharedStore, Theme,
};

/// CLI application handler - routes commands into the note store
pub struct App {
    /// The note collection
    notes: NoteStore,

    /// Key-value backend, shared with the note store; the theme preference
    /// goes through here directly
    store: SharedStore,

    /// Application configuration
    config: Config,
}

impl App {
    /// Create a new CLI application over the given store and config
    pub fn new(notes: NoteStore, store: SharedStore, config: Config) -> Self {
        Self {
            notes,
            store,
            config,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                title,
                content,
                category,
            } => self.handle_add(&title, &content, category),

            Commands::List {
                category,
                search,
                format,
                limit,
                brief,
            } => self.handle_list(category, search.as_deref(), format, limit, brief),

            Commands::Search {
                query,
                limit,
                format,
            } => self.handle_search(&query, limit, format),

            Commands::Toggle { id } => self.handle_toggle(id),

            Commands::Edit {
                id,
                title,
                content,
                category,
            } => self.handle_edit(id, title, content, category),

            Commands::Delete { id, force } => self.handle_delete(id, force),

            Commands::Theme { set } => self.handle_theme(set),
        }
    }

    fn handle_add(&mut self, title: &str, content: &str, category: Option<Category>) -> Result<()> {
        let category = category.unwrap_or(self.config.default_category);
        let note = self.notes.create(title, content, category)?;
        println!("Note created with ID: {}", note.id);
        Ok(())
    }

    fn handle_list(
        &self,
        category: CategoryFilter,
        search: Option<&str>,
        format: OutputFormat,
        limit: usize,
        brief: bool,
    ) -> Result<()> {
        let mut results = self.notes.query(category, search.unwrap_or(""));
        debug!("Query matched {} notes", results.len());

        if limit > 0 && results.len() > limit {
            results.truncate(limit);
        }

        println!("{}", render_notes(&results, format, brief)?);
        Ok(())
    }

    fn handle_search(&self, query: &str, limit: usize, format: OutputFormat) -> Result<()> {
        let mut results = self.notes.search(query);

        if limit > 0 && results.len() > limit {
            results.truncate(limit);
        }

        println!("{}", render_notes(&results, format, false)?);
        Ok(())
    }

    fn handle_toggle(&mut self, id: NoteId) -> Result<()> {
        let note = self.notes.toggle_complete(id)?;
        println!(
            "Note '{}' ({}) is now {}.",
            note.title,
            note.id,
            if note.completed { "done" } else { "open" }
        );
        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: NoteId,
        title: Option<String>,
        content: Option<String>,
        category: Option<Category>,
    ) -> Result<()> {
        let existing = self.notes.get(id).ok_or(KeepError::NoteNotFound { id })?;
        let title = title.unwrap_or_else(|| existing.title.clone());
        let content = content.unwrap_or_else(|| existing.content.clone());
        let category = category.unwrap_or(existing.category);

        let note = self.notes.update(id, &title, &content, category)?;
        println!("Note {} updated successfully", note.id);
        Ok(())
    }

    fn handle_delete(&mut self, id: NoteId, force: bool) -> Result<()> {
        let note = self
            .notes
            .get(id)
            .ok_or(KeepError::NoteNotFound { id })?
            .clone();

        if !force && !Self::confirm_delete(&note)? {
            println!("Deletion cancelled.");
            return Ok(());
        }

        let removed = self.notes.delete(id)?;
        println!(
            "Note '{}' ({}) has been permanently deleted.",
            removed.title, removed.id
        );
        Ok(())
    }

    /// Show note details and prompt for confirmation. The confirmation gates
    /// a single delete attempt.
    fn confirm_delete(note: &Note) -> Result<bool> {
        println!("You are about to delete the following note:");
        println!("ID:       {}", note.id);
        println!("Title:    {}", note.title);
        println!("Category: {}", note.category);
        println!("Created:  {}", note.created_at.format("%Y-%m-%d %H:%M:%S"));

        if !note.content.is_empty() {
            let preview = note.content.lines().take(2).collect::<Vec<_>>().join("\n");
            println!("\nContent preview:");
            println!(
                "{}{}",
                preview,
                if note.content.lines().count() > 2 {
                    "..."
                } else {
                    ""
                }
            );
        }

        println!("\nThis action cannot be undone!");
        print!("Are you sure you want to delete this note? [y/N]: ");
        stdout().flush()?;

        let mut input = String::new();
        stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    fn handle_theme(&mut self, set: Option<Theme>) -> Result<()> {
        let next = match set {
            Some(theme) => theme,
            None => Theme::load(&*self.store.borrow()).toggle(),
        };
        next.store(&mut *self.store.borrow_mut())?;
        println!("Theme set to {}", next);
        Ok(())
    }
}
