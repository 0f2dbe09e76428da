//! # Storage Layer
//!
//! Two stores back every operation:
//!
//! - [`NoteStoreClient`]: the remote note service. Its transport is not part of
//!   this crate; errors come back as opaque [`ClinoteError::Remote`] values and
//!   are propagated unchanged.
//! - [`Storager`]: local persistent state, i.e. the last search results (for
//!   numeric lookups), the notebook cache and the recovery point of a failed save.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in the data directory
//! - [`memory::InMemoryStore`] and [`memory::InMemoryNoteStore`]: no persistence,
//!   used for testing and offline use
//!
//! [`ClinoteError::Remote`]: crate::error::ClinoteError::Remote

use crate::error::Result;
use crate::model::{Note, NoteFilter, Notebook};

pub mod fs;
pub mod memory;

/// The remote note service.
pub trait NoteStoreClient {
    /// Note metadata matching `filter`, without content.
    fn find_notes(&self, filter: &NoteFilter, offset: usize, count: usize) -> Result<Vec<Note>>;

    /// The full wire document of a note.
    fn get_note_content(&self, guid: &str) -> Result<String>;

    /// Creates the note and returns it as stored, with its GUID set.
    fn create_note(&mut self, note: &Note) -> Result<Note>;

    /// Updates an existing note. An empty body updates metadata only.
    fn update_note(&mut self, note: &Note) -> Result<()>;

    /// Moves the note to the trash.
    fn delete_note(&mut self, guid: &str) -> Result<()>;

    fn get_notebook(&self, guid: &str) -> Result<Notebook>;

    fn list_notebooks(&self) -> Result<Vec<Notebook>>;
}

/// Local persistent state.
pub trait Storager {
    /// Results of the last note search, in listing order.
    fn get_search(&self) -> Result<Vec<Note>>;

    fn save_search(&mut self, notes: &[Note]) -> Result<()>;

    /// The note whose last save failed, if any.
    fn get_recovery_point(&self) -> Result<Option<Note>>;

    fn save_recovery_point(&mut self, note: &Note) -> Result<()>;

    fn get_notebook_cache(&self) -> Result<Vec<Notebook>>;

    fn store_notebook_list(&mut self, notebooks: &[Notebook]) -> Result<()>;
}
