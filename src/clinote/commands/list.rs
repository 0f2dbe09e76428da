use super::CmdResult;
use crate::error::Result;
use crate::model::{NoteFilter, NoteOrder};
use crate::notebook::find_notebook;
use crate::store::{NoteStoreClient, Storager};
use tracing::debug;

/// Searches for notes, most recently updated first, and remembers the
/// result so its entries can be referred to by number.
///
/// Without a search term every note matches.
pub fn run<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &N,
    search: Option<&str>,
    notebook: Option<&str>,
    count: usize,
) -> Result<CmdResult> {
    let mut filter = NoteFilter {
        words: search.filter(|s| !s.is_empty()).map(str::to_string),
        order: NoteOrder::Updated,
        ..NoteFilter::default()
    };
    if let Some(name) = notebook.filter(|n| !n.is_empty()) {
        filter.notebook_guid = Some(find_notebook(store, ns, name)?.guid);
    }

    let notes = ns.find_notes(&filter, 0, count)?;
    debug!(found = notes.len(), "saving search results");
    store.save_search(&notes)?;

    let mut notebooks = store.get_notebook_cache()?;
    if notebooks.is_empty() {
        notebooks = ns.list_notebooks()?;
        store.store_notebook_list(&notebooks)?;
    }

    Ok(CmdResult::default()
        .with_listed_notes(notes)
        .with_notebooks(notebooks))
}
