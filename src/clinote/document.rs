//! The editable document: a header block followed by the note content.

use crate::header::{parse_header, write_header};
use crate::model::{EditMode, Note};
use std::io::{self, BufRead, Cursor, Write};

/// Writes the note as an editable document. The output always ends with a newline.
pub fn write_note<W: Write>(w: &mut W, note: &Note, mode: EditMode) -> io::Result<()> {
    write_header(w, note)?;
    let content = note.content(mode.raw);
    w.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

/// Renders the note to a string, see [`write_note`].
pub fn render_note(note: &Note, mode: EditMode) -> io::Result<String> {
    let mut buf = Vec::new();
    write_note(&mut buf, note, mode)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// The note as it reads back from its own document: title trimmed, blank
/// lines around the content dropped, CR line endings removed.
///
/// An edit that leaves the document untouched yields exactly this note.
pub fn round_trip(note: &Note, mode: EditMode) -> io::Result<Note> {
    let document = render_note(note, mode)?;
    let mut echoed = note.clone();
    parse_note(Cursor::new(document.as_bytes()), &mut echoed, mode)?;
    Ok(echoed)
}

/// Reads an edited document back into `note`.
///
/// The header updates title and notebook, everything after it becomes the
/// body (raw mode) or the markdown. A document without a header delimiter
/// yields empty content.
pub fn parse_note<R: BufRead>(reader: R, note: &mut Note, mode: EditMode) -> io::Result<()> {
    let mut lines = reader.lines();
    parse_header(&mut lines, note)?;

    let mut content = String::new();
    for line in lines {
        let line = line?;
        content.push_str(line.strip_suffix('\r').unwrap_or(&line));
        content.push('\n');
    }
    note.set_content(mode.raw, content.trim_matches('\n').to_string());
    Ok(())
}
