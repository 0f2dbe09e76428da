//! Plain-text table of notes, as shown after a search.
//!
//! The position of a note in the table is the number it can be looked up by.

use crate::model::{Note, Notebook};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 40;
const NOTEBOOK_WIDTH: usize = 20;
const TIME_WIDTH: usize = 16;

pub fn write_note_listing<W: Write>(
    w: &mut W,
    notes: &[Note],
    notebooks: &[Notebook],
    now: DateTime<Utc>,
) -> io::Result<()> {
    writeln!(
        w,
        "{:>4}  {}  {}  {:>width$}",
        "#",
        pad_to_width("Title", TITLE_WIDTH),
        pad_to_width("Notebook", NOTEBOOK_WIDTH),
        "Updated",
        width = TIME_WIDTH
    )?;

    for (i, note) in notes.iter().enumerate() {
        writeln!(
            w,
            "{:>4}  {}  {}  {:>width$}",
            format!("{}.", i + 1),
            pad_to_width(&truncate_to_width(&note.title, TITLE_WIDTH), TITLE_WIDTH),
            pad_to_width(
                &truncate_to_width(notebook_name(note, notebooks), NOTEBOOK_WIDTH),
                NOTEBOOK_WIDTH
            ),
            format_time_ago(note.updated, now),
            width = TIME_WIDTH
        )?;
    }
    Ok(())
}

/// Prefers the current name from `notebooks` over the one the note carries.
fn notebook_name<'a>(note: &'a Note, notebooks: &'a [Notebook]) -> &'a str {
    let Some(notebook) = &note.notebook else {
        return "";
    };
    notebook
        .guid()
        .and_then(|guid| notebooks.iter().find(|nb| nb.guid == guid))
        .map(|nb| nb.name.as_str())
        .unwrap_or_else(|| notebook.name())
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(updated_ms: i64, now: DateTime<Utc>) -> String {
    if updated_ms == 0 {
        return String::new();
    }
    let Some(updated) = DateTime::<Utc>::from_timestamp_millis(updated_ms) else {
        return String::new();
    };
    let duration = now.signed_duration_since(updated);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
