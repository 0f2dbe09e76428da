use super::get::get_note;
use super::save::save_metadata;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{NoteStoreClient, Storager};

/// Changes a note's title without touching its content.
pub fn run<S: Storager, N: NoteStoreClient>(
    store: &mut S,
    ns: &mut N,
    old: &str,
    new: &str,
    count: usize,
) -> Result<CmdResult> {
    let mut note = get_note(store, ns, old, None, count)?;
    note.title = new.to_string();
    save_metadata(ns, &note)?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note renamed: {} -> {}", old, new)))
        .with_affected_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enml;
    use crate::store::memory::fixtures::NoteStoreFixture;

    #[test]
    fn test_renames_and_keeps_content() {
        let mut fx = NoteStoreFixture::new().with_note("Draft", None, "<p>body</p>");
        let result = run(&mut fx.store, &mut fx.notestore, "Draft", "Final", 20).unwrap();

        let guid = &result.affected_notes[0].guid;
        assert_eq!(fx.notestore.note(guid).unwrap().title, "Final");
        assert_eq!(
            fx.notestore.content(guid),
            Some(enml::wrap("<p>body</p>").as_str())
        );
    }
}
