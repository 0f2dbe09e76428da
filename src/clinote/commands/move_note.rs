use super::get::get_note;
use super::save::save_metadata;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NotebookRef;
use crate::notebook::find_notebook;
use crate::store::{NoteStoreClient, Storager};

/// Moves a note to another notebook.
pub fn run<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &mut N,
    title: &str,
    notebook: &str,
    count: usize,
) -> Result<CmdResult> {
    let mut note = get_note(store, ns, title, None, count)?;
    let nb = find_notebook(store, ns, notebook)?;
    if note.notebook.as_ref().and_then(NotebookRef::guid) == Some(nb.guid.as_str()) {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "Note {} is already in {}",
            note.title, nb.name
        ))));
    }
    note.notebook = Some(NotebookRef::Resolved(nb));
    save_metadata(ns, &note)?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Note moved: {} -> {}",
            note.title, notebook
        )))
        .with_affected_notes(vec![note]))
}
