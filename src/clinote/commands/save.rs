//! Pushing notes to the note store.
//!
//! The note passed in is never modified: the wire document is built on a copy,
//! so the in-memory note still holds the user's edits if the save fails. A
//! failed update hands that note to the recovery point so it can be reopened.
//! Failed creates are returned as-is.

use crate::client::Client;
use crate::convert::ContentConverter;
use crate::enml;
use crate::error::{ClinoteError, Result};
use crate::model::{EditMode, Note};
use crate::store::{NoteStoreClient, Storager};
use tracing::{info, warn};

/// Updates an existing note's title, notebook and content.
pub fn save_changes<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    note: &Note,
    mode: EditMode,
) -> Result<()> {
    let mut outgoing = note.clone();
    outgoing.body = wire_content(client.converter.as_ref(), note, mode.raw);

    info!(guid = %note.guid, title = %note.title, "updating note");
    match client.notestore.update_note(&outgoing) {
        Ok(()) => Ok(()),
        Err(err) => Err(create_recovery_point(&mut client.store, note, err)),
    }
}

/// Creates a note and returns it as stored remotely.
pub fn save_new_note<S: Storager, N: NoteStoreClient>(
    client: &mut Client<S, N>,
    note: &Note,
    raw: bool,
) -> Result<Note> {
    let mut outgoing = note.clone();
    outgoing.body = if raw || !note.md.is_empty() {
        wire_content(client.converter.as_ref(), note, raw)
    } else {
        enml::empty_document()
    };

    info!(title = %note.title, notebook = note.notebook_name(), "creating note");
    client.notestore.create_note(&outgoing)
}

/// Updates title and notebook only, leaving the remote content as it is.
pub fn save_metadata<N: NoteStoreClient>(ns: &mut N, note: &Note) -> Result<()> {
    let mut outgoing = note.clone();
    outgoing.body.clear();
    info!(guid = %note.guid, title = %note.title, "updating note metadata");
    ns.update_note(&outgoing)
}

fn wire_content(converter: &dyn ContentConverter, note: &Note, raw: bool) -> String {
    if raw {
        enml::wrap(&note.body)
    } else {
        enml::wrap(&converter.to_wire_markup(&note.md))
    }
}

/// Stores `note` as the recovery point and returns the error to report.
fn create_recovery_point<S: Storager>(store: &mut S, note: &Note, err: ClinoteError) -> ClinoteError {
    warn!(guid = %note.guid, error = %err, "save failed, creating recovery point");
    match store.save_recovery_point(note) {
        Ok(()) => err,
        Err(recovery) => ClinoteError::RecoveryPointFailed {
            save: Box::new(err),
            recovery: Box::new(recovery),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheDir;
    use crate::store::memory::fixtures::NoteStoreFixture;
    use crate::store::memory::{InMemoryNoteStore, InMemoryStore};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts conversions so tests can tell whether the converter ran.
    struct CountingConverter(Rc<Cell<usize>>);

    impl ContentConverter for CountingConverter {
        fn to_wire_markup(&self, markdown: &str) -> String {
            self.0.set(self.0.get() + 1);
            format!("<p>{}</p>", markdown)
        }

        fn to_markdown(&self, markup: &str) -> Result<String> {
            Ok(markup.to_string())
        }
    }

    fn setup(fx: NoteStoreFixture) -> (Client<InMemoryStore, InMemoryNoteStore>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let client = Client::new(fx.store, fx.notestore, CacheDir::new(std::env::temp_dir()))
            .with_converter(CountingConverter(calls.clone()));
        (client, calls)
    }

    fn existing(client: &Client<InMemoryStore, InMemoryNoteStore>, title: &str) -> Note {
        let found = client
            .notestore
            .find_notes(&Default::default(), 0, 20)
            .unwrap();
        found.into_iter().find(|n| n.title == title).unwrap()
    }

    #[test]
    fn test_markdown_update_is_converted_and_wrapped() {
        let (mut client, calls) = setup(NoteStoreFixture::new().with_note("T", None, "old"));
        let mut note = existing(&client, "T");
        note.md = "new".into();
        save_changes(&mut client, &note, EditMode::default()).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(client.notestore.updated[0].body, enml::wrap("<p>new</p>"));
        assert_eq!(note.md, "new");
    }

    #[test]
    fn test_raw_update_wraps_body_verbatim() {
        let (mut client, calls) = setup(NoteStoreFixture::new().with_note("T", None, "old"));
        let mut note = existing(&client, "T");
        note.body = "<div>raw</div>".into();
        save_changes(&mut client, &note, EditMode::default().raw()).unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(client.notestore.updated[0].body, enml::wrap("<div>raw</div>"));
    }

    #[test]
    fn test_empty_new_note_is_an_empty_document() {
        let (mut client, calls) = setup(NoteStoreFixture::new());
        let created = save_new_note(&mut client, &Note::new("Blank"), false).unwrap();

        assert!(!created.guid.is_empty());
        assert_eq!(calls.get(), 0);
        assert_eq!(
            client.notestore.created[0].body,
            format!("{}<en-note></en-note>", enml::XML_HEADER)
        );
    }

    #[test]
    fn test_new_note_with_markdown_is_converted() {
        let (mut client, calls) = setup(NoteStoreFixture::new());
        let mut note = Note::new("Filled");
        note.md = "text".into();
        save_new_note(&mut client, &note, false).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(client.notestore.created[0].body, enml::wrap("<p>text</p>"));
    }

    #[test]
    fn test_failed_update_creates_recovery_point() {
        let (mut client, _) = setup(NoteStoreFixture::new().with_note("T", None, "old"));
        client.notestore.fail_updates("network down");
        let mut note = existing(&client, "T");
        note.md = "precious edit".into();

        let err = save_changes(&mut client, &note, EditMode::default()).unwrap_err();
        assert!(matches!(err, ClinoteError::Remote(m) if m == "network down"));
        let recovered = client.store.get_recovery_point().unwrap().unwrap();
        assert_eq!(recovered.md, "precious edit");
        assert_eq!(recovered.guid, note.guid);
    }

    #[test]
    fn test_failed_recovery_point_is_reported_with_save_error() {
        let (mut client, _) = setup(NoteStoreFixture::new().with_note("T", None, "old"));
        client.notestore.fail_updates("network down");
        client.store.fail_recovery_point_writes("disk full");
        let note = existing(&client, "T");

        let err = save_changes(&mut client, &note, EditMode::default()).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("network down"));
        assert!(text.contains("disk full"));
    }

    #[test]
    fn test_failed_create_skips_recovery_point() {
        let (mut client, _) = setup(NoteStoreFixture::new());
        client.notestore.fail_creates("quota");
        let err = save_new_note(&mut client, &Note::new("x"), false).unwrap_err();
        assert!(matches!(err, ClinoteError::Remote(_)));
        assert!(client.store.get_recovery_point().unwrap().is_none());
    }

    #[test]
    fn test_metadata_update_sends_no_body() {
        let mut fx = NoteStoreFixture::new().with_note("Old", None, "kept");
        let mut note = fx
            .notestore
            .find_notes(&Default::default(), 0, 20)
            .unwrap()
            .remove(0);
        note.title = "New".into();
        note.body = "stale".into();
        save_metadata(&mut fx.notestore, &note).unwrap();

        assert_eq!(fx.notestore.note(&note.guid).unwrap().title, "New");
        assert_eq!(fx.notestore.content(&note.guid), Some(enml::wrap("kept").as_str()));
    }
}
