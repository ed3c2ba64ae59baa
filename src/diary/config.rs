use crate::error::{DiaryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATABASE_FILE: &str = "diary.db";
const DEFAULT_PAGE_SIZE: usize = 9;

/// How list screens number their items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListNumbering {
    #[default]
    PageLocal,
    Global,
}

/// What ends multi-line content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultilineTerminator {
    #[default]
    EmptyLine,
    TwoEmptyLines,
}

/// Configuration for diary, stored as `config.json` in the app directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiaryConfig {
    /// Items per page in list screens
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub numbering: ListNumbering,

    #[serde(default)]
    pub multiline_end: MultilineTerminator,

    /// Database file name, relative to the app directory unless absolute
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            numbering: ListNumbering::default(),
            multiline_end: MultilineTerminator::default(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
        }
    }
}

impl DiaryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: DiaryConfig = serde_json::from_str(&content)?;
        if config.page_size == 0 {
            return Err(DiaryError::Config(format!(
                "page_size must be at least 1 in {}",
                config_path.display()
            )));
        }
        config.database_file = config.database_file.trim().to_string();
        if config.database_file.is_empty() {
            config.database_file = default_database_file();
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Set the page size (values below 1 become 1)
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
    }
}
