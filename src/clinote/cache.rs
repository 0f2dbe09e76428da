//! Cache documents: the transient files a note lives in while it is being edited.
//!
//! A [`CacheFile`] removes itself when dropped, so every exit path of an edit
//! session cleans up after itself.

use crate::error::{ClinoteError, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates (or truncates) a cache document and opens it for writing.
    pub fn new_cache_file(&self, name: &str) -> Result<CacheFile> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(ClinoteError::Store(format!(
                "Invalid cache file name: {:?}",
                name
            )));
        }
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ClinoteError::Io)?;
        }
        let path = self.root.join(name);
        let file = File::create(&path).map_err(ClinoteError::Io)?;
        debug!(path = %path.display(), "created cache file");
        Ok(CacheFile {
            path,
            file: Some(file),
            removed: false,
        })
    }
}

#[derive(Debug)]
pub struct CacheFile {
    path: PathBuf,
    file: Option<File>,
    removed: bool,
}

impl CacheFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Flushes and releases the handle. Must happen before another program
    /// opens the file.
    pub fn close(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all().map_err(ClinoteError::Io)?;
        }
        Ok(())
    }

    /// Opens the file again for reading from the start.
    pub fn reopen(&mut self) -> Result<()> {
        self.file = Some(File::open(&self.path).map_err(ClinoteError::Io)?);
        Ok(())
    }

    pub fn close_and_remove(mut self) -> Result<()> {
        self.file.take();
        self.removed = true;
        debug!(path = %self.path.display(), "removing cache file");
        fs::remove_file(&self.path).map_err(ClinoteError::Io)
    }

    fn handle(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("cache file is closed"))
    }
}

impl Read for CacheFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.handle()?.read(buf)
    }
}

impl Write for CacheFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.handle()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.handle()?.flush()
    }
}

impl Drop for CacheFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        self.file.take();
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %err, "failed to remove cache file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_close_reopen_read() {
        let dir = tempdir().unwrap();
        let cache = CacheDir::new(dir.path().join("cache"));
        let mut file = cache.new_cache_file("note.md").unwrap();
        file.write_all(b"hello").unwrap();
        file.close().unwrap();
        assert!(!file.is_open());
        assert!(file.write_all(b"more").is_err());

        file.reopen().unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_close_and_remove_deletes_file() {
        let dir = tempdir().unwrap();
        let cache = CacheDir::new(dir.path());
        let file = cache.new_cache_file("note.md").unwrap();
        let path = file.path().to_path_buf();
        file.close_and_remove().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_dropping_removes_file() {
        let dir = tempdir().unwrap();
        let cache = CacheDir::new(dir.path());
        let path = {
            let file = cache.new_cache_file("note.xml").unwrap();
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = tempdir().unwrap();
        let cache = CacheDir::new(dir.path());
        assert!(cache.new_cache_file("../escape.md").is_err());
        assert!(cache.new_cache_file("").is_err());
    }
}
