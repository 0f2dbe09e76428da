//! Turning notebook names into notebooks known by the note store.

use crate::error::{ClinoteError, Result};
use crate::model::{Notebook, NotebookRef};
use crate::store::{NoteStoreClient, Storager};
use tracing::debug;

/// Finds a notebook by name, checking the local cache before asking the note
/// store. A remote lookup refreshes the cache.
pub fn find_notebook<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &N,
    name: &str,
) -> Result<Notebook> {
    if let Some(nb) = by_name(store.get_notebook_cache()?, name) {
        return Ok(nb);
    }

    debug!(notebook = name, "notebook not cached, refreshing from note store");
    let notebooks = ns.list_notebooks()?;
    store.store_notebook_list(&notebooks)?;
    by_name(notebooks, name).ok_or_else(|| ClinoteError::NotebookNotFound(name.to_string()))
}

/// Resolves a notebook reference to the notebook as currently stored remotely.
pub fn resolve<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &N,
    notebook: &NotebookRef,
) -> Result<NotebookRef> {
    let resolved = match notebook.guid() {
        Some(guid) => ns.get_notebook(guid)?,
        None => find_notebook(store, ns, notebook.name())?,
    };
    Ok(NotebookRef::Resolved(resolved))
}

fn by_name(notebooks: Vec<Notebook>, name: &str) -> Option<Notebook> {
    notebooks.into_iter().find(|nb| nb.name == name)
}
