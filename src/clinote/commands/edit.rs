//! Edit sessions: a note goes out to a cache document, through the user's
//! editor, and back.
//!
//! ```text
//! fetch ─▶ write cache document ─▶ editor ─▶ parse ─┬─▶ unchanged: done
//!                                                   └─▶ notebook lookup ─▶ save
//! ```
//!
//! An existing note is only saved when its title, its content or its notebook
//! changed. The cache document is removed on every exit path.

use super::get::get_note_with_content;
use super::save::{save_changes, save_new_note};
use super::{CmdMessage, CmdResult};
use crate::cache::CacheFile;
use crate::client::Client;
use crate::document::{parse_note, round_trip, write_note};
use crate::error::{ClinoteError, Result};
use crate::fingerprint::{changed, Fingerprint};
use crate::model::{EditMode, Note, NotebookRef};
use crate::notebook;
use crate::store::{NoteStoreClient, Storager};
use std::io::{BufReader, BufWriter, Read};
use tracing::{debug, warn};
use uuid::Uuid;

const NEW_NOTE_PREFIX: &str = "new_note_";

/// Edits an existing note, found by title (optionally within `notebook`) or
/// saved search index, or the recovery point when `mode.recovery_point` is set.
pub fn edit_note<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    title: &str,
    notebook: Option<&str>,
    mode: EditMode,
) -> Result<CmdResult> {
    let mut note = if mode.recovery_point {
        client
            .store
            .get_recovery_point()?
            .filter(|n| !n.is_new())
            .ok_or(ClinoteError::NoteNotFound)?
    } else {
        get_note_with_content(
            &mut client.store,
            &client.notestore,
            client.converter.as_ref(),
            title,
            notebook,
            client.config.search_count,
        )?
    };

    // Compare against the note as its document reads back, not as fetched.
    let echoed = round_trip(&note, mode).map_err(ClinoteError::Io)?;
    let before = Fingerprint::of(&echoed, mode.raw);
    if let Some(nb) = &note.notebook {
        note.notebook = Some(notebook::resolve(&mut client.store, &client.notestore, nb)?);
    }
    let initial_notebook = note.notebook_name().to_string();

    let cache = edit_in_cache(client, &mut note, mode)?;
    refresh_notebook(client, &mut note, &initial_notebook)?;

    let unchanged = !changed(&before, &Fingerprint::of(&note, mode.raw))
        && initial_notebook == note.notebook_name();
    let result = if unchanged {
        debug!(guid = %note.guid, "note unchanged, skipping save");
        CmdResult::default().with_message(CmdMessage::info(format!(
            "No changes to note: {}",
            note.title
        )))
    } else {
        save_changes(client, &note, mode)?;
        CmdResult::default()
            .with_message(CmdMessage::success(format!("Note saved: {}", note.title)))
            .with_affected_notes(vec![note])
    };

    remove_cache(cache);
    Ok(result)
}

/// Opens a note that does not exist remotely yet in the editor and creates it.
pub fn create_and_edit_new_note<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    mut note: Note,
    mode: EditMode,
) -> Result<CmdResult> {
    let initial_notebook = note.notebook_name().to_string();

    let cache = edit_in_cache(client, &mut note, mode)?;
    refresh_notebook(client, &mut note, &initial_notebook)?;
    let created = save_new_note(client, &note, mode.raw)?;

    remove_cache(cache);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note created: {}", created.title)))
        .with_affected_notes(vec![created]))
}

/// Writes the note to a cache document, lets the user edit it and parses the
/// result back into `note`. Returns the still existing cache document.
fn edit_in_cache<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    note: &mut Note,
    mode: EditMode,
) -> Result<CacheFile> {
    let mut cache = client.cache.new_cache_file(&cache_file_name(note, mode))?;

    if mode.stdin {
        let mut content = String::new();
        client
            .input
            .read_to_string(&mut content)
            .map_err(ClinoteError::Io)?;
        note.md = content.clone();
        note.body = content;
    }

    {
        let mut writer = BufWriter::new(&mut cache);
        write_note(&mut writer, note, mode).map_err(ClinoteError::Io)?;
    }
    // Editors may not see the content while this process holds the file open.
    cache.close()?;

    if !mode.stdin {
        client.editor.edit(cache.path())?;
    }

    cache.reopen()?;
    parse_note(BufReader::new(&mut cache), note, mode).map_err(ClinoteError::Io)?;
    debug!(title = %note.title, notebook = note.notebook_name(), "parsed edited note");
    Ok(cache)
}

/// Looks up the notebook again, but only if the user renamed it.
fn refresh_notebook<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    note: &mut Note,
    initial_notebook: &str,
) -> Result<()> {
    let name = note.notebook_name();
    if name.is_empty() || name == initial_notebook {
        return Ok(());
    }
    debug!(from = initial_notebook, to = name, "notebook changed");
    let nb = notebook::find_notebook(&mut client.store, &client.notestore, name)?;
    note.notebook = Some(NotebookRef::Resolved(nb));
    Ok(())
}

/// Existing notes are named after their GUID, new ones get a random name so
/// that concurrent sessions never share a file.
fn cache_file_name(note: &Note, mode: EditMode) -> String {
    if note.is_new() {
        format!("{}{}{}", NEW_NOTE_PREFIX, Uuid::new_v4(), mode.extension())
    } else {
        format!("{}{}", note.guid, mode.extension())
    }
}

fn remove_cache(cache: CacheFile) {
    let path = cache.path().to_path_buf();
    if let Err(err) = cache.close_and_remove() {
        warn!(path = %path.display(), error = %err, "failed to remove cache file");
    }
}
