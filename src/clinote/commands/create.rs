use super::edit::create_and_edit_new_note;
use super::save::save_new_note;
use super::{CmdMessage, CmdResult};
use crate::client::Client;
use crate::error::Result;
use crate::model::{EditMode, Note, NotebookRef};
use crate::notebook::find_notebook;
use crate::store::{NoteStoreClient, Storager};

pub const DEFAULT_TITLE: &str = "Untitled note";

/// Creates a note. Without `edit` (or stdin content) the note is created
/// empty; otherwise it is opened in an edit session first.
///
/// Without a notebook the note store's default notebook is used.
pub fn run<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    title: Option<&str>,
    notebook: Option<&str>,
    edit: bool,
    mode: EditMode,
) -> Result<CmdResult> {
    let mut note = Note::new(title.filter(|t| !t.trim().is_empty()).unwrap_or(DEFAULT_TITLE));
    if let Some(name) = notebook.filter(|n| !n.is_empty()) {
        let nb = find_notebook(&mut client.store, &client.notestore, name)?;
        note.notebook = Some(NotebookRef::Resolved(nb));
    }

    if edit || mode.stdin {
        return create_and_edit_new_note(client, note, mode);
    }

    let created = save_new_note(client, &note, mode.raw)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note created: {}", created.title)))
        .with_affected_notes(vec![created]))
}
