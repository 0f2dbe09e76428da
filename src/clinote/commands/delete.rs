use super::get::get_note;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{NoteStoreClient, Storager};

/// Moves a note to the trash.
pub fn run<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &mut N,
    title: &str,
    notebook: Option<&str>,
    count: usize,
) -> Result<CmdResult> {
    let note = get_note(store, ns, title, notebook, count)?;
    ns.delete_note(&note.guid)?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note deleted: {}", note.title)))
        .with_affected_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClinoteError;
    use crate::store::memory::fixtures::NoteStoreFixture;

    #[test]
    fn test_trashes_note() {
        let mut fx = NoteStoreFixture::new().with_note("Old", None, "");
        let result = run(&mut fx.store, &mut fx.notestore, "Old", None, 20).unwrap();
        let guid = &result.affected_notes[0].guid;
        assert_eq!(fx.notestore.deleted, vec![guid.clone()]);
        assert!(fx.notestore.note(guid).unwrap().deleted);
    }

    #[test]
    fn test_missing_note_is_not_found() {
        let mut fx = NoteStoreFixture::new();
        let err = run(&mut fx.store, &mut fx.notestore, "Old", None, 20).unwrap_err();
        assert!(matches!(err, ClinoteError::NoteNotFound));
    }
}
