use crate::convert::ContentConverter;
use crate::enml;
use crate::error::{ClinoteError, Result};
use crate::model::{Note, NoteFilter};
use crate::notebook::find_notebook;
use crate::store::{NoteStoreClient, Storager};
use tracing::debug;

/// Looks up a note's metadata.
///
/// A positive number within the range of the last search picks that search
/// result (1-based). Anything else is searched for remotely, optionally within
/// `notebook`, and must match a title exactly.
pub fn get_note<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &N,
    title: &str,
    notebook: Option<&str>,
    count: usize,
) -> Result<Note> {
    if let Ok(index) = title.parse::<usize>() {
        if index > 0 {
            let mut saved = store.get_search()?;
            if index <= saved.len() {
                debug!(index, "using saved search result");
                return Ok(saved.swap_remove(index - 1));
            }
        }
    }

    let mut filter = NoteFilter {
        words: Some(title.to_string()),
        ..NoteFilter::default()
    };
    if let Some(name) = notebook.filter(|n| !n.is_empty()) {
        filter.notebook_guid = Some(find_notebook(store, ns, name)?.guid);
    }

    ns.find_notes(&filter, 0, count)?
        .into_iter()
        .find(|n| n.title == title)
        .ok_or(ClinoteError::NoteNotFound)
}

/// Looks up a note and fetches its content, filling both the body and its
/// markdown rendering.
pub fn get_note_with_content<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &N,
    converter: &dyn ContentConverter,
    title: &str,
    notebook: Option<&str>,
    count: usize,
) -> Result<Note> {
    let mut note = get_note(store, ns, title, notebook, count)?;
    let content = ns.get_note_content(&note.guid)?;
    note.body = enml::note_body(&content);
    note.md = converter.to_markdown(&note.body)?;
    Ok(note)
}
