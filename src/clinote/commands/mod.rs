use crate::model::{Note, Notebook};

pub mod create;
pub mod delete;
pub mod edit;
pub mod get;
pub mod list;
pub mod move_note;
pub mod rename;
pub mod save;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Notes written to the note store.
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub notebooks: Vec<Notebook>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_notebooks(mut self, notebooks: Vec<Notebook>) -> Self {
        self.notebooks = notebooks;
        self
    }
}
