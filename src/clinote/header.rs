//! The metadata block at the top of an editable note document.
//!
//! ```text
//! ---
//! title: Groceries
//! notebook: Home
//! ---
//! ```
//!
//! Parsing is lenient: text before the first delimiter and unknown keys inside
//! the block are skipped, and a missing closing delimiter keeps whatever was read.

use crate::model::{Note, NotebookRef};
use std::io::{self, Write};

pub const HEADER_SEPARATOR: &str = "---";
pub const TITLE_FIELD: &str = "title:";
pub const NOTEBOOK_FIELD: &str = "notebook:";

pub fn write_header<W: Write>(w: &mut W, note: &Note) -> io::Result<()> {
    writeln!(w, "{}", HEADER_SEPARATOR)?;
    writeln!(w, "{} {}", TITLE_FIELD, note.title)?;
    if !note.notebook_name().is_empty() {
        writeln!(w, "{} {}", NOTEBOOK_FIELD, note.notebook_name())?;
    }
    writeln!(w, "{}", HEADER_SEPARATOR)
}

/// Reads the header from `lines`, leaving the iterator positioned after the
/// closing delimiter.
pub fn parse_header<I>(lines: &mut I, note: &mut Note) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    // Find the opening delimiter.
    let mut opened = false;
    for line in lines.by_ref() {
        if normalize(&line?) == HEADER_SEPARATOR {
            opened = true;
            break;
        }
    }
    if !opened {
        return Ok(());
    }

    for line in lines.by_ref() {
        let line = line?;
        let line = normalize(&line);
        if line == HEADER_SEPARATOR {
            break;
        }

        if let Some(value) = line.strip_prefix(TITLE_FIELD) {
            note.title = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(NOTEBOOK_FIELD) {
            let name = value.trim();
            // A changed name replaces the resolved notebook with a placeholder.
            if !name.is_empty() && name != note.notebook_name() {
                note.notebook = Some(NotebookRef::Named(name.to_string()));
            }
        }
    }
    Ok(())
}

fn normalize(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Notebook;
    use std::io::{BufRead, Cursor};

    fn parse(input: &str, note: &mut Note) {
        let mut lines = Cursor::new(input.as_bytes()).lines();
        parse_header(&mut lines, note).unwrap();
    }

    #[test]
    fn test_writes_title_only() {
        let mut buf = Vec::new();
        write_header(&mut buf, &Note::new("Groceries")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "---\ntitle: Groceries\n---\n");
    }

    #[test]
    fn test_writes_notebook_when_named() {
        let mut note = Note::new("Groceries");
        note.notebook = Some(Notebook::new("nb-1", "Home").into());
        let mut buf = Vec::new();
        write_header(&mut buf, &note).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "---\ntitle: Groceries\nnotebook: Home\n---\n"
        );
    }

    #[test]
    fn test_skips_text_before_header() {
        let mut note = Note::default();
        parse("junk\nmore junk\n---\ntitle:   Spaced  \n---\n", &mut note);
        assert_eq!(note.title, "Spaced");
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let mut note = Note::default();
        parse("---\ntags: a, b\ntitle: T\nnotebook: Work\n---\n", &mut note);
        assert_eq!(note.title, "T");
        assert_eq!(note.notebook, Some(NotebookRef::Named("Work".into())));
    }

    #[test]
    fn test_unterminated_header_keeps_parsed_fields() {
        let mut note = Note::default();
        parse("---\ntitle: Half", &mut note);
        assert_eq!(note.title, "Half");
    }

    #[test]
    fn test_keeps_resolved_notebook_when_name_unchanged() {
        let mut note = Note::new("T");
        note.notebook = Some(Notebook::new("nb-1", "Home").into());
        parse("---\ntitle: T\nnotebook: Home\n---\n", &mut note);
        assert_eq!(note.notebook.as_ref().and_then(|n| n.guid()), Some("nb-1"));
    }

    #[test]
    fn test_missing_fields_keep_previous_values() {
        let mut note = Note::new("Old");
        note.notebook = Some(NotebookRef::Named("Home".into()));
        parse("---\nnotebook:\n---\n", &mut note);
        assert_eq!(note.title, "Old");
        assert_eq!(note.notebook_name(), "Home");
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let mut note = Note::default();
        parse("---\r\ntitle: Windows\r\n---\r\n", &mut note);
        assert_eq!(note.title, "Windows");
    }
}
