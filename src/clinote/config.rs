use crate::error::{ClinoteError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SEARCH_COUNT: usize = 20;

/// Configuration for clinote, stored as config.json in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClinoteConfig {
    /// Editor command, overrides $EDITOR and $VISUAL
    #[serde(default)]
    pub editor: Option<String>,

    /// How many notes a title lookup or listing asks the note store for
    #[serde(default = "default_search_count")]
    pub search_count: usize,

    /// Where cache documents are written while editing
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

fn default_search_count() -> usize {
    DEFAULT_SEARCH_COUNT
}

impl Default for ClinoteConfig {
    fn default() -> Self {
        Self {
            editor: None,
            search_count: DEFAULT_SEARCH_COUNT,
            cache_dir: None,
        }
    }
}

impl ClinoteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ClinoteError::Io)?;
        let config: ClinoteConfig =
            serde_json::from_str(&content).map_err(ClinoteError::Serialization)?;
        if config.search_count == 0 {
            return Err(ClinoteError::Config(
                "search_count must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ClinoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ClinoteError::Serialization)?;
        fs::write(config_path, content).map_err(ClinoteError::Io)?;
        Ok(())
    }
}

/// Directories used by clinote.
#[derive(Debug, Clone)]
pub struct ClinotePaths {
    pub data: PathBuf,
    pub cache: PathBuf,
}

impl ClinotePaths {
    /// The platform's per-user data and cache directories.
    pub fn from_system() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "clinote", "clinote").ok_or_else(|| {
            ClinoteError::Config("Could not determine home directory".to_string())
        })?;
        Ok(Self {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Applies the cache directory override from `config`.
    pub fn with_config(mut self, config: &ClinoteConfig) -> Self {
        if let Some(cache) = &config.cache_dir {
            self.cache = cache.clone();
        }
        self
    }
}
