use thiserror::Error;

/// A value rejected by an entity or service rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Blank(&'static str),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid date '{0}', expected dd-mm-yyyy")]
    InvalidDate(String),

    #[error("End date cannot be before start date")]
    InvalidDateRange,
}

#[derive(Error, Debug)]
pub enum DiaryError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("An author with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Cannot delete {name}: diary entries still reference this author ({count})")]
    AuthorHasEntries { name: String, count: u64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DiaryError {
    /// True for errors caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DiaryError::Validation(_)
                | DiaryError::DuplicateEmail(_)
                | DiaryError::AuthorHasEntries { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DiaryError>;
