use super::{NoteStoreClient, Storager};
use crate::error::{ClinoteError, Result};
use crate::model::{Note, NoteFilter, NoteOrder, Notebook, NotebookRef};
use std::cell::Cell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory local store for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    search: Vec<Note>,
    recovery_point: Option<Note>,
    notebooks: Vec<Notebook>,
    fail_recovery_point: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later recovery point write fail with `message`.
    pub fn fail_recovery_point_writes(&mut self, message: impl Into<String>) {
        self.fail_recovery_point = Some(message.into());
    }
}

impl Storager for InMemoryStore {
    fn get_search(&self) -> Result<Vec<Note>> {
        Ok(self.search.clone())
    }

    fn save_search(&mut self, notes: &[Note]) -> Result<()> {
        self.search = notes.to_vec();
        Ok(())
    }

    fn get_recovery_point(&self) -> Result<Option<Note>> {
        Ok(self.recovery_point.clone())
    }

    fn save_recovery_point(&mut self, note: &Note) -> Result<()> {
        if let Some(message) = &self.fail_recovery_point {
            return Err(ClinoteError::Store(message.clone()));
        }
        self.recovery_point = Some(note.clone());
        Ok(())
    }

    fn get_notebook_cache(&self) -> Result<Vec<Notebook>> {
        Ok(self.notebooks.clone())
    }

    fn store_notebook_list(&mut self, notebooks: &[Notebook]) -> Result<()> {
        self.notebooks = notebooks.to_vec();
        Ok(())
    }
}

struct StoredNote {
    note: Note,
    content: String,
}

/// In-memory note service. Records every write so callers can inspect them,
/// and can be told to fail writes.
#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: HashMap<String, StoredNote>,
    notebooks: Vec<Notebook>,
    next_timestamp: i64,
    find_calls: Cell<usize>,
    pub created: Vec<Note>,
    pub updated: Vec<Note>,
    pub deleted: Vec<String>,
    fail_creates: Option<String>,
    fail_updates: Option<String>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notebook(&mut self, guid: &str, name: &str) -> Notebook {
        let notebook = Notebook::new(guid, name);
        self.notebooks.push(notebook.clone());
        notebook
    }

    /// Stores a note with the given wire document and returns its GUID.
    pub fn add_note(&mut self, title: &str, notebook_guid: Option<&str>, content: &str) -> String {
        let mut note = Note::new(title);
        note.guid = Uuid::new_v4().to_string();
        note.notebook = notebook_guid
            .and_then(|guid| self.notebooks.iter().find(|nb| nb.guid == guid))
            .cloned()
            .map(NotebookRef::Resolved);
        note.created = self.tick();
        note.updated = note.created;
        let guid = note.guid.clone();
        self.notes.insert(
            guid.clone(),
            StoredNote {
                note,
                content: content.to_string(),
            },
        );
        guid
    }

    pub fn note(&self, guid: &str) -> Option<&Note> {
        self.notes.get(guid).map(|stored| &stored.note)
    }

    pub fn content(&self, guid: &str) -> Option<&str> {
        self.notes.get(guid).map(|stored| stored.content.as_str())
    }

    /// Number of `find_notes` calls so far.
    pub fn find_calls(&self) -> usize {
        self.find_calls.get()
    }

    pub fn fail_creates(&mut self, message: impl Into<String>) {
        self.fail_creates = Some(message.into());
    }

    pub fn fail_updates(&mut self, message: impl Into<String>) {
        self.fail_updates = Some(message.into());
    }

    pub fn clear_failures(&mut self) {
        self.fail_creates = None;
        self.fail_updates = None;
    }

    fn tick(&mut self) -> i64 {
        self.next_timestamp += 1000;
        self.next_timestamp
    }

    fn resolve_notebook(&self, notebook: Option<&NotebookRef>) -> Option<NotebookRef> {
        let notebook = notebook?;
        match notebook.guid() {
            Some(guid) => self
                .notebooks
                .iter()
                .find(|nb| nb.guid == guid)
                .cloned()
                .map(NotebookRef::Resolved),
            None => Some(notebook.clone()),
        }
    }
}

impl NoteStoreClient for InMemoryNoteStore {
    fn find_notes(&self, filter: &NoteFilter, offset: usize, count: usize) -> Result<Vec<Note>> {
        self.find_calls.set(self.find_calls.get() + 1);
        let words = filter.words.as_deref().map(str::to_lowercase);

        let mut found: Vec<&StoredNote> = self
            .notes
            .values()
            .filter(|stored| !stored.note.deleted)
            .filter(|stored| match &filter.notebook_guid {
                Some(guid) => {
                    stored.note.notebook.as_ref().and_then(NotebookRef::guid) == Some(guid.as_str())
                }
                None => true,
            })
            .filter(|stored| match &words {
                Some(words) => {
                    stored.note.title.to_lowercase().contains(words)
                        || stored.content.to_lowercase().contains(words)
                }
                None => true,
            })
            .collect();

        match filter.order {
            NoteOrder::Created => found.sort_by(|a, b| b.note.created.cmp(&a.note.created)),
            NoteOrder::Title => found.sort_by(|a, b| a.note.title.cmp(&b.note.title)),
            _ => found.sort_by(|a, b| b.note.updated.cmp(&a.note.updated)),
        }

        Ok(found
            .into_iter()
            .skip(offset)
            .take(count)
            .map(|stored| stored.note.clone())
            .collect())
    }

    fn get_note_content(&self, guid: &str) -> Result<String> {
        self.content(guid)
            .map(str::to_string)
            .ok_or_else(|| ClinoteError::Remote(format!("Note not found: {}", guid)))
    }

    fn create_note(&mut self, note: &Note) -> Result<Note> {
        if let Some(message) = &self.fail_creates {
            return Err(ClinoteError::Remote(message.clone()));
        }
        self.created.push(note.clone());

        let mut stored = note.clone();
        stored.guid = Uuid::new_v4().to_string();
        stored.notebook = self.resolve_notebook(note.notebook.as_ref());
        stored.created = self.tick();
        stored.updated = stored.created;
        let content = std::mem::take(&mut stored.body);
        stored.md.clear();

        self.notes.insert(
            stored.guid.clone(),
            StoredNote {
                note: stored.clone(),
                content,
            },
        );
        Ok(stored)
    }

    fn update_note(&mut self, note: &Note) -> Result<()> {
        if let Some(message) = &self.fail_updates {
            return Err(ClinoteError::Remote(message.clone()));
        }
        self.updated.push(note.clone());

        let notebook = self.resolve_notebook(note.notebook.as_ref());
        let updated = self.tick();
        let stored = self
            .notes
            .get_mut(&note.guid)
            .ok_or_else(|| ClinoteError::Remote(format!("Note not found: {}", note.guid)))?;
        stored.note.title = note.title.clone();
        if notebook.is_some() {
            stored.note.notebook = notebook;
        }
        stored.note.updated = updated;
        if !note.body.is_empty() {
            stored.content = note.body.clone();
        }
        Ok(())
    }

    fn delete_note(&mut self, guid: &str) -> Result<()> {
        let stored = self
            .notes
            .get_mut(guid)
            .ok_or_else(|| ClinoteError::Remote(format!("Note not found: {}", guid)))?;
        stored.note.deleted = true;
        self.deleted.push(guid.to_string());
        Ok(())
    }

    fn get_notebook(&self, guid: &str) -> Result<Notebook> {
        self.notebooks
            .iter()
            .find(|nb| nb.guid == guid)
            .cloned()
            .ok_or_else(|| ClinoteError::Remote(format!("Notebook not found: {}", guid)))
    }

    fn list_notebooks(&self) -> Result<Vec<Notebook>> {
        Ok(self.notebooks.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::enml;

    pub struct NoteStoreFixture {
        pub store: InMemoryStore,
        pub notestore: InMemoryNoteStore,
    }

    impl Default for NoteStoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl NoteStoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                notestore: InMemoryNoteStore::new(),
            }
        }

        pub fn with_notebook(mut self, guid: &str, name: &str) -> Self {
            self.notestore.add_notebook(guid, name);
            self
        }

        /// Adds a note whose body is `inner` wrapped in the wire envelope.
        pub fn with_note(mut self, title: &str, notebook_guid: Option<&str>, inner: &str) -> Self {
            self.notestore
                .add_note(title, notebook_guid, &enml::wrap(inner));
            self
        }

        pub fn with_search(mut self, titles: &[&str]) -> Self {
            let notes: Vec<Note> = titles.iter().map(|t| Note::new(*t)).collect();
            self.store.save_search(&notes).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_notes_filters_by_words_and_notebook() {
        let mut ns = InMemoryNoteStore::new();
        ns.add_notebook("nb-1", "Home");
        ns.add_note("Groceries", Some("nb-1"), "milk");
        ns.add_note("Grocery ideas", None, "bread");
        ns.add_note("Taxes", Some("nb-1"), "forms");

        let filter = NoteFilter {
            words: Some("grocer".into()),
            ..NoteFilter::default()
        };
        assert_eq!(ns.find_notes(&filter, 0, 20).unwrap().len(), 2);

        let filter = NoteFilter {
            notebook_guid: Some("nb-1".into()),
            ..NoteFilter::default()
        };
        let titles: Vec<_> = ns
            .find_notes(&filter, 0, 20)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, ["Taxes", "Groceries"]);
        assert_eq!(ns.find_calls(), 2);
    }

    #[test]
    fn test_update_with_empty_body_keeps_content() {
        let mut ns = InMemoryNoteStore::new();
        let guid = ns.add_note("Old", None, "<en-note>kept</en-note>");
        let mut note = ns.note(&guid).cloned().unwrap();
        note.title = "New".into();
        ns.update_note(&note).unwrap();

        assert_eq!(ns.note(&guid).unwrap().title, "New");
        assert_eq!(ns.content(&guid), Some("<en-note>kept</en-note>"));
    }

    #[test]
    fn test_create_assigns_guid() {
        let mut ns = InMemoryNoteStore::new();
        let created = ns.create_note(&Note::new("Fresh")).unwrap();
        assert!(!created.guid.is_empty());
        assert_eq!(ns.created.len(), 1);
    }

    #[test]
    fn test_injected_failures_surface_as_remote_errors() {
        let mut ns = InMemoryNoteStore::new();
        ns.fail_creates("rate limited");
        assert!(matches!(
            ns.create_note(&Note::new("x")),
            Err(ClinoteError::Remote(m)) if m == "rate limited"
        ));

        let mut store = InMemoryStore::new();
        store.fail_recovery_point_writes("read-only");
        assert!(store.save_recovery_point(&Note::new("x")).is_err());
    }
}
