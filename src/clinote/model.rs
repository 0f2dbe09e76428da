use serde::{Deserialize, Serialize};

/// A notebook as known by the remote note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub stack: String,
    #[serde(default)]
    pub default_notebook: bool,
}

impl Notebook {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            stack: String::new(),
            default_notebook: false,
        }
    }
}

/// The notebook a note belongs to.
///
/// A name read from an edited document is only a placeholder until it has been
/// looked up against the note store, which replaces it with the resolved notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotebookRef {
    Named(String),
    Resolved(Notebook),
}

impl NotebookRef {
    pub fn name(&self) -> &str {
        match self {
            NotebookRef::Named(name) => name,
            NotebookRef::Resolved(nb) => &nb.name,
        }
    }

    /// The remote identifier, available only once resolved.
    pub fn guid(&self) -> Option<&str> {
        match self {
            NotebookRef::Named(_) => None,
            NotebookRef::Resolved(nb) if nb.guid.is_empty() => None,
            NotebookRef::Resolved(nb) => Some(&nb.guid),
        }
    }
}

impl From<Notebook> for NotebookRef {
    fn from(nb: Notebook) -> Self {
        NotebookRef::Resolved(nb)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Empty until the note has been created remotely.
    pub guid: String,
    pub title: String,
    /// Inner markup of the note in the remote wire format.
    pub body: String,
    /// Markdown rendering used for local editing.
    pub md: String,
    #[serde(default)]
    pub deleted: bool,
    pub notebook: Option<NotebookRef>,
    /// Milliseconds since the epoch, as reported by the note store.
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub updated: i64,
}

impl Note {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.guid.is_empty()
    }

    /// Name of the notebook, or an empty string when none is set.
    pub fn notebook_name(&self) -> &str {
        self.notebook.as_ref().map(NotebookRef::name).unwrap_or("")
    }

    /// The content field selected by the edit mode.
    pub fn content(&self, raw: bool) -> &str {
        if raw {
            &self.body
        } else {
            &self.md
        }
    }

    pub fn set_content(&mut self, raw: bool, content: String) {
        if raw {
            self.body = content;
        } else {
            self.md = content;
        }
    }
}

/// Options for an edit session. They combine freely, e.g. raw content read from stdin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    /// Edit the wire markup verbatim instead of the markdown rendering.
    pub raw: bool,
    /// Reopen the note whose last save failed.
    pub recovery_point: bool,
    /// Take the content from the input stream instead of an editor.
    pub stdin: bool,
}

impl EditMode {
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn recovery_point(mut self) -> Self {
        self.recovery_point = true;
        self
    }

    pub fn stdin(mut self) -> Self {
        self.stdin = true;
        self
    }

    pub fn extension(&self) -> &'static str {
        if self.raw {
            ".xml"
        } else {
            ".md"
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteOrder {
    Created,
    #[default]
    Updated,
    Relevance,
    SequenceNumber,
    Title,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Restricts the search to one notebook.
    pub notebook_guid: Option<String>,
    /// Search string or note title.
    pub words: Option<String>,
    pub order: NoteOrder,
}
