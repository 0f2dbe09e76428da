//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for clinote operations, regardless of the UI being used.
//!
//! It dispatches to `commands/*.rs`, fills in defaults from the configuration
//! (such as how many notes a lookup asks for) and returns structured
//! [`CmdResult`] values. It never prints.
//!
//! ## Generic Over Stores
//!
//! `ClinoteApi<S: Storager, N: NoteStoreClient>` is generic over both stores:
//! - Production: `ClinoteApi<FileStore, YourTransport>`
//! - Testing: `ClinoteApi<InMemoryStore, InMemoryNoteStore>`

use crate::client::Client;
use crate::commands;
use crate::error::Result;
use crate::model::{EditMode, Note};
use crate::store::{NoteStoreClient, Storager};

pub struct ClinoteApi<S: Storager, N: NoteStoreClient> {
    client: Client<S, N>,
}

impl<S: Storager, N: NoteStoreClient> ClinoteApi<S, N> {
    pub fn new(client: Client<S, N>) -> Self {
        Self { client }
    }

    /// Opens a note in the editor and saves it if it changed. `title` may also
    /// be the number of a note in the last listing.
    pub fn edit_note(
        &mut self,
        title: &str,
        notebook: Option<&str>,
        mode: EditMode,
    ) -> Result<CmdResult> {
        commands::edit::edit_note(&mut self.client, title, notebook, mode)
    }

    /// Reopens the note whose last save failed.
    pub fn edit_recovery_point(&mut self, mode: EditMode) -> Result<CmdResult> {
        commands::edit::edit_note(&mut self.client, "", None, mode.recovery_point())
    }

    pub fn create_note(
        &mut self,
        title: Option<&str>,
        notebook: Option<&str>,
        edit: bool,
        mode: EditMode,
    ) -> Result<CmdResult> {
        commands::create::run(&mut self.client, title, notebook, edit, mode)
    }

    /// Lists notes and remembers them for lookups by number. `count` defaults
    /// to the configured search count.
    pub fn list_notes(
        &mut self,
        search: Option<&str>,
        notebook: Option<&str>,
        count: Option<usize>,
    ) -> Result<CmdResult> {
        let count = count.unwrap_or(self.client.config.search_count);
        commands::list::run(
            &mut self.client.store,
            &self.client.notestore,
            search,
            notebook,
            count,
        )
    }

    pub fn get_note(&mut self, title: &str, notebook: Option<&str>) -> Result<Note> {
        commands::get::get_note(
            &mut self.client.store,
            &self.client.notestore,
            title,
            notebook,
            self.client.config.search_count,
        )
    }

    /// Fetches a note including its body and markdown rendering.
    pub fn get_note_with_content(&mut self, title: &str, notebook: Option<&str>) -> Result<Note> {
        commands::get::get_note_with_content(
            &mut self.client.store,
            &self.client.notestore,
            self.client.converter.as_ref(),
            title,
            notebook,
            self.client.config.search_count,
        )
    }

    pub fn change_title(&mut self, old: &str, new: &str) -> Result<CmdResult> {
        commands::rename::run(
            &mut self.client.store,
            &mut self.client.notestore,
            old,
            new,
            self.client.config.search_count,
        )
    }

    pub fn move_note(&mut self, title: &str, notebook: &str) -> Result<CmdResult> {
        commands::move_note::run(
            &mut self.client.store,
            &mut self.client.notestore,
            title,
            notebook,
            self.client.config.search_count,
        )
    }

    pub fn delete_note(&mut self, title: &str, notebook: Option<&str>) -> Result<CmdResult> {
        commands::delete::run(
            &mut self.client.store,
            &mut self.client.notestore,
            title,
            notebook,
            self.client.config.search_count,
        )
    }

    pub fn client(&self) -> &Client<S, N> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut Client<S, N> {
        &mut self.client
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
