use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|error| panic!("email pattern must compile: {error}"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AuthorId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(trimmed.to_string())
}

/// Someone who writes diary entries.
///
/// Two authors are the same author when their emails match; the email is
/// stored trimmed and lowercased, so the comparison ignores case.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    id: Option<AuthorId>,
    first_name: String,
    last_name: String,
    email: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl Author {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            first_name: required("First name", first_name)?,
            last_name: required("Last name", last_name)?,
            email: Self::checked_email(email)?,
            created_at: None,
            updated_at: None,
        })
    }

    /// Rebuilds a saved author from trusted storage.
    pub(crate) fn restore(
        id: AuthorId,
        first_name: String,
        last_name: String,
        email: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            first_name,
            last_name,
            email,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    pub(crate) fn mark_saved(&mut self, id: AuthorId, at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    /// Trims and lowercases an email the way it will be stored.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(&Self::normalize_email(email))
    }

    fn checked_email(email: &str) -> Result<String, ValidationError> {
        let normalized = required("Email", email)?.to_lowercase();
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(ValidationError::InvalidEmail(normalized));
        }
        Ok(normalized)
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<(), ValidationError> {
        self.first_name = required("First name", first_name)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<(), ValidationError> {
        self.last_name = required("Last name", last_name)?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        self.email = Self::checked_email(email)?;
        Ok(())
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.email)
    }
}

/// A dated piece of writing by one author.
///
/// Entries are identified by their database id. An entry that was never saved
/// has no identity yet and compares unequal to every entry, itself included,
/// which is why this type is `PartialEq` but not `Eq`.
#[derive(Debug, Clone, Serialize)]
pub struct DiaryEntry {
    id: Option<EntryId>,
    title: String,
    author: Author,
    content: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl DiaryEntry {
    pub fn new(title: &str, author: Author, content: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            title: required("Title", title)?,
            author,
            content: required("Content", content)?,
            created_at: None,
            updated_at: None,
        })
    }

    pub(crate) fn restore(
        id: EntryId,
        title: String,
        author: Author,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            author,
            content,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    pub(crate) fn mark_saved(&mut self, id: EntryId, at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    pub fn id(&self) -> Option<EntryId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = required("Title", title)?;
        Ok(())
    }

    pub fn set_content(&mut self, content: &str) -> Result<(), ValidationError> {
        self.content = required("Content", content)?;
        Ok(())
    }

    pub fn set_author(&mut self, author: Author) {
        self.author = author;
    }

    /// First `max_chars` characters of the content, with `...` when cut.
    pub fn content_preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let cut: String = self.content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }

    pub fn display_title(&self) -> String {
        format!("{} by {}", self.title, self.author.full_name())
    }
}

impl PartialEq for DiaryEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for DiaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_title())
    }
}
