//! Turns note lists into terminal text, JSON, or HTML.

use std::{
    fmt::Write as _,
    str::FromStr,
};

use crate::{Note, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Html => f.write_str("html"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!(
                "invalid format '{other}', must be one of: text, json, html"
            )),
        }
    }
}

/// Replaces markup-significant characters with their entities.
///
/// Every user-supplied string must pass through here before landing in an
/// HTML surface; titles and content are free text.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders `notes` in the requested format. `brief` drops content bodies
/// from the text and JSON forms.
pub fn render_notes(notes: &[&Note], format: OutputFormat, brief: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(notes, brief)),
        OutputFormat::Json => render_json(notes, brief),
        OutputFormat::Html => Ok(render_html(notes)),
    }
}

fn render_text(notes: &[&Note], brief: bool) -> String {
    if notes.is_empty() {
        return "No notes found matching the criteria.".to_string();
    }

    let term_width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80);

    let mut out = String::new();
    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out, "{}", "-".repeat(term_width.min(50)));
        }

        let marker = if note.completed { "[x]" } else { "[ ]" };
        let created_at = note.created_at.format("%Y-%m-%d %H:%M");

        let _ = writeln!(
            out,
            "ID: {} {} {} | Created: {}",
            note.id,
            marker,
            console::style(note.category).cyan(),
            created_at
        );
        let _ = writeln!(out, "Title: {}", console::style(&note.title).bold());

        if !brief && !note.content.is_empty() {
            let _ = writeln!(out, "\n{}", content_preview(&note.content, 100));
        }
    }

    let _ = write!(
        out,
        "\nFound {} note{}",
        notes.len(),
        if notes.len() == 1 { "" } else { "s" }
    );
    out
}

fn render_json(notes: &[&Note], brief: bool) -> Result<String> {
    if brief {
        let simplified: Vec<serde_json::Value> = notes
            .iter()
            .map(|note| {
                serde_json::json!({
                    "id": note.id,
                    "title": note.title,
                    "category": note.category,
                    "completed": note.completed,
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&simplified)?)
    } else {
        Ok(serde_json::to_string_pretty(&notes)?)
    }
}

fn render_html(notes: &[&Note]) -> String {
    let mut out = String::from("<ul class=\"notes\">\n");

    for note in notes {
        let done = if note.completed { " completed" } else { "" };
        let _ = writeln!(out, "  <li class=\"note-card{}\" data-id=\"{}\">", done, note.id);
        let _ = writeln!(out, "    <h3>{}</h3>", escape_html(&note.title));
        let _ = writeln!(out, "    <p>{}</p>", escape_html(&note.content));
        let _ = writeln!(
            out,
            "    <span class=\"category category-{}\">{}</span>",
            note.category, note.category
        );
        let _ = writeln!(out, "    <time>{}</time>", note.created_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "  </li>");
    }

    out.push_str("</ul>");
    out
}

/// First non-empty line of `content`, truncated to `max_len` characters.
fn content_preview(content: &str, max_len: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}
