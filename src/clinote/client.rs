use crate::cache::CacheDir;
use crate::config::{ClinoteConfig, ClinotePaths};
use crate::convert::{ContentConverter, MarkdownConverter};
use crate::editor::{Editor, SystemEditor};
use crate::error::Result;
use crate::store::fs::FileStore;
use crate::store::{NoteStoreClient, Storager};
use std::io::{self, Read};

/// Everything an operation may need: both stores, the editor, the content
/// converter, the cache directory and the input stream for stdin mode.
pub struct Client<S: Storager, N: NoteStoreClient> {
    pub store: S,
    pub notestore: N,
    pub editor: Box<dyn Editor>,
    pub converter: Box<dyn ContentConverter>,
    pub cache: CacheDir,
    pub input: Box<dyn Read>,
    pub config: ClinoteConfig,
}

impl<S: Storager, N: NoteStoreClient> Client<S, N> {
    pub fn new(store: S, notestore: N, cache: CacheDir) -> Self {
        Self {
            store,
            notestore,
            editor: Box::new(SystemEditor::default()),
            converter: Box::new(MarkdownConverter),
            cache,
            input: Box::new(io::stdin()),
            config: ClinoteConfig::default(),
        }
    }

    /// Applies `config`, including its editor override.
    pub fn with_config(mut self, config: ClinoteConfig) -> Self {
        self.editor = Box::new(SystemEditor::new(config.editor.clone()));
        self.config = config;
        self
    }

    pub fn with_editor(mut self, editor: impl Editor + 'static) -> Self {
        self.editor = Box::new(editor);
        self
    }

    pub fn with_converter(mut self, converter: impl ContentConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn with_input(mut self, input: impl Read + 'static) -> Self {
        self.input = Box::new(input);
        self
    }
}

impl<N: NoteStoreClient> Client<FileStore, N> {
    /// A client using the platform directories and the config found there.
    pub fn from_system(notestore: N) -> Result<Self> {
        let paths = ClinotePaths::from_system()?;
        let config = ClinoteConfig::load(&paths.data)?;
        let paths = paths.with_config(&config);
        let store = FileStore::new(paths.data);
        Ok(Self::new(store, notestore, CacheDir::new(paths.cache)).with_config(config))
    }
}
