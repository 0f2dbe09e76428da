//! Change detection for edit sessions.
//!
//! A fingerprint covers the title and the content field selected by the edit
//! mode. Notebook moves are not covered and must be compared separately.

use crate::model::Note;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(note: &Note, raw: bool) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(note.title.as_bytes());
        hasher.update(note.content(raw).as_bytes());
        Self(hasher.finalize().into())
    }
}

pub fn changed(before: &Fingerprint, after: &Fingerprint) -> bool {
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, body: &str, md: &str) -> Note {
        let mut n = Note::new(title);
        n.body = body.into();
        n.md = md.into();
        n
    }

    #[test]
    fn test_equal_inputs_hash_equal() {
        let a = note("T", "<p>x</p>", "x");
        let mut b = a.clone();
        b.guid = "different".into();
        b.updated = 42;
        assert!(!changed(&Fingerprint::of(&a, false), &Fingerprint::of(&b, false)));
        assert!(!changed(&Fingerprint::of(&a, true), &Fingerprint::of(&b, true)));
    }

    #[test]
    fn test_title_change_is_detected() {
        let a = note("T", "", "x");
        let b = note("T2", "", "x");
        assert!(changed(&Fingerprint::of(&a, false), &Fingerprint::of(&b, false)));
    }

    #[test]
    fn test_only_selected_content_counts() {
        let a = note("T", "<p>x</p>", "x");
        let b = note("T", "<p>y</p>", "x");
        assert!(!changed(&Fingerprint::of(&a, false), &Fingerprint::of(&b, false)));
        assert!(changed(&Fingerprint::of(&a, true), &Fingerprint::of(&b, true)));
    }
}
