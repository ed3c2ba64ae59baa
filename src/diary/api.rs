//! # API Facade
//!
//! A **thin facade** over the services and the single entry point for every
//! diary operation, whatever the UI.
//!
//! The facade owns the store, dispatches to `services::*`, and turns raw user
//! text into typed values where that is needed (see [`parse_date`]). It holds
//! no business rules and never prints.
//!
//! `DiaryApi<S: DataStore>` is generic so tests can run it over an in-memory
//! SQLite database or a recording store.

use chrono::NaiveDate;

use crate::error::{Result, ValidationError};
use crate::model::{Author, AuthorId, DiaryEntry, EntryId};
use crate::services::statistics::Statistics;
use crate::services::{authors, entries, statistics};
use crate::store::DataStore;

/// Format used for dates typed by the user.
pub const DATE_INPUT_FORMAT: &str = "%d-%m-%Y";

/// Parses a `dd-mm-yyyy` date.
pub fn parse_date(input: &str) -> std::result::Result<NaiveDate, ValidationError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

pub struct DiaryApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> DiaryApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Hands the store back, e.g. to close it.
    pub fn into_store(self) -> S {
        self.store
    }

    // Authors

    pub fn create_author(&mut self, first_name: &str, last_name: &str, email: &str) -> Result<Option<Author>> {
        authors::create(&mut self.store, first_name, last_name, email)
    }

    pub fn create_author_or_err(&mut self, first_name: &str, last_name: &str, email: &str) -> Result<Author> {
        authors::create_or_err(&mut self.store, first_name, last_name, email)
    }

    pub fn find_author(&self, id: AuthorId) -> Result<Option<Author>> {
        authors::find_by_id(&self.store, id)
    }

    pub fn find_author_by_email(&self, email: &str) -> Result<Option<Author>> {
        authors::find_by_email(&self.store, email)
    }

    pub fn list_authors(&self) -> Result<Vec<Author>> {
        authors::list(&self.store)
    }

    pub fn email_exists(&self, email: &str) -> Result<bool> {
        authors::email_exists(&self.store, email)
    }

    pub fn update_author(&mut self, author: Author) -> Result<Author> {
        authors::update(&mut self.store, author)
    }

    pub fn delete_author(&mut self, author: &Author) -> Result<()> {
        authors::delete(&mut self.store, author)
    }

    // Entries

    pub fn create_entry(&mut self, title: &str, author: &Author, content: &str) -> Result<DiaryEntry> {
        entries::create(&mut self.store, title, author, content)
    }

    pub fn find_entry(&self, id: EntryId) -> Result<Option<DiaryEntry>> {
        entries::find_by_id(&self.store, id)
    }

    pub fn list_entries(&self) -> Result<Vec<DiaryEntry>> {
        entries::list(&self.store)
    }

    pub fn entries_by_author(&self, author: &Author) -> Result<Vec<DiaryEntry>> {
        entries::by_author(&self.store, author)
    }

    pub fn search_entries(&self, keyword: &str) -> Result<Vec<DiaryEntry>> {
        entries::search(&self.store, keyword)
    }

    pub fn entries_on(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>> {
        entries::on_date(&self.store, date)
    }

    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DiaryEntry>> {
        entries::between(&self.store, start, end)
    }

    pub fn update_entry_title(&mut self, entry: DiaryEntry, title: &str) -> Result<DiaryEntry> {
        entries::update_title(&mut self.store, entry, title)
    }

    pub fn update_entry_content(&mut self, entry: DiaryEntry, content: &str) -> Result<DiaryEntry> {
        entries::update_content(&mut self.store, entry, content)
    }

    pub fn update_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry> {
        entries::update(&mut self.store, entry)
    }

    pub fn delete_entry(&mut self, entry: &DiaryEntry) -> Result<()> {
        entries::delete(&mut self.store, entry)
    }

    pub fn delete_entry_by_id(&mut self, id: EntryId) -> Result<bool> {
        entries::delete_by_id(&mut self.store, id)
    }

    pub fn count_entries(&self) -> Result<u64> {
        entries::count(&self.store)
    }

    pub fn count_entries_by_author(&self, author: &Author) -> Result<u64> {
        entries::count_by_author(&self.store, author)
    }

    // Statistics

    pub fn statistics(&self) -> Result<Statistics> {
        statistics::collect(&self.store)
    }
}
