use super::Storager;
use crate::error::{ClinoteError, Result};
use crate::model::{Note, Notebook};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const SEARCH_FILE: &str = "search.json";
const RECOVERY_FILE: &str = "recovery.json";
const NOTEBOOKS_FILE: &str = "notebooks.json";

/// File-based local store.
///
/// ```text
/// <data dir>/
/// ├── search.json      # Last search results
/// ├── recovery.json    # Note whose save failed
/// └── notebooks.json   # Notebook cache
/// ```
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ClinoteError::Io)?;
        }
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ClinoteError::Io)?;
        let value = serde_json::from_str(&content).map_err(ClinoteError::Serialization)?;
        Ok(Some(value))
    }

    fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(ClinoteError::Serialization)?;
        fs::write(self.root.join(name), content).map_err(ClinoteError::Io)?;
        Ok(())
    }
}

impl Storager for FileStore {
    fn get_search(&self) -> Result<Vec<Note>> {
        Ok(self.load(SEARCH_FILE)?.unwrap_or_default())
    }

    fn save_search(&mut self, notes: &[Note]) -> Result<()> {
        self.save(SEARCH_FILE, notes)
    }

    fn get_recovery_point(&self) -> Result<Option<Note>> {
        self.load(RECOVERY_FILE)
    }

    fn save_recovery_point(&mut self, note: &Note) -> Result<()> {
        self.save(RECOVERY_FILE, note)
    }

    fn get_notebook_cache(&self) -> Result<Vec<Notebook>> {
        Ok(self.load(NOTEBOOKS_FILE)?.unwrap_or_default())
    }

    fn store_notebook_list(&mut self, notebooks: &[Notebook]) -> Result<()> {
        self.save(NOTEBOOKS_FILE, notebooks)
    }
}
