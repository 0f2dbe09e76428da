use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinoteError {
    #[error("no note found")]
    NoteNotFound,

    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Config error: {0}")]
    Config(String),

    /// A remote save failed and the local recovery point could not be written either.
    #[error("Error when saving note: {save}\nFailed to create recovery point: {recovery}")]
    RecoveryPointFailed {
        save: Box<ClinoteError>,
        recovery: Box<ClinoteError>,
    },
}

pub type Result<T> = std::result::Result<T, ClinoteError>;
