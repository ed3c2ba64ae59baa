//! # Storage Layer
//!
//! The [`DataStore`] trait is everything the services need from persistence.
//! Keeping it a trait lets service tests swap in a recording store to prove a
//! rule fired *before* anything was written.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: the production store. One owned
//!   `rusqlite::Connection`, opened on a file or in memory, closed explicitly.
//!
//! ## Conventions
//!
//! - Inserts take an unsaved entity and hand it back with id and timestamps set.
//! - Lookups return `Ok(None)` for missing rows; deletes return whether a row
//!   was removed.
//! - Every list of entries comes back newest first.
//! - Emails are compared lowercased, matching how [`Author`] stores them.

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{Author, AuthorId, DiaryEntry, EntryId};

pub mod sqlite;

pub trait DataStore {
    fn insert_author(&mut self, author: Author) -> Result<Author>;
    fn update_author(&mut self, author: Author) -> Result<Author>;
    fn delete_author(&mut self, id: AuthorId) -> Result<bool>;
    fn find_author(&self, id: AuthorId) -> Result<Option<Author>>;
    fn find_author_by_email(&self, email: &str) -> Result<Option<Author>>;
    fn email_exists(&self, email: &str) -> Result<bool>;
    /// All authors in the order they were created.
    fn list_authors(&self) -> Result<Vec<Author>>;
    fn count_authors(&self) -> Result<u64>;

    /// Saves a new entry. Its author must already be saved.
    fn insert_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry>;
    fn update_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry>;
    fn delete_entry(&mut self, id: EntryId) -> Result<bool>;
    fn find_entry(&self, id: EntryId) -> Result<Option<DiaryEntry>>;
    fn list_entries(&self) -> Result<Vec<DiaryEntry>>;
    fn entries_by_author(&self, id: AuthorId) -> Result<Vec<DiaryEntry>>;
    /// Entries whose title or content contains `keyword`, ignoring case.
    fn search_entries(&self, keyword: &str) -> Result<Vec<DiaryEntry>>;
    /// Entries created on local calendar days `start..=end`.
    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DiaryEntry>>;
    fn count_entries(&self) -> Result<u64>;
    fn count_entries_by_author(&self, id: AuthorId) -> Result<u64>;
    /// Every author with their entry count, zero included, in creation order.
    fn entry_counts_by_author(&self) -> Result<Vec<(Author, u64)>>;
}
