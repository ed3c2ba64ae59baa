use std::cell::RefCell;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{Author, AuthorId, DiaryEntry, EntryId};
use crate::store::sqlite::SqliteStore;
use crate::store::DataStore;

/// In-memory SQLite store that remembers which trait methods were called.
pub(crate) struct RecordingStore {
    inner: SqliteStore,
    calls: RefCell<Vec<&'static str>>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: SqliteStore::open_in_memory().unwrap(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl DataStore for RecordingStore {
    fn insert_author(&mut self, author: Author) -> Result<Author> {
        self.record("insert_author");
        self.inner.insert_author(author)
    }

    fn update_author(&mut self, author: Author) -> Result<Author> {
        self.record("update_author");
        self.inner.update_author(author)
    }

    fn delete_author(&mut self, id: AuthorId) -> Result<bool> {
        self.record("delete_author");
        self.inner.delete_author(id)
    }

    fn find_author(&self, id: AuthorId) -> Result<Option<Author>> {
        self.record("find_author");
        self.inner.find_author(id)
    }

    fn find_author_by_email(&self, email: &str) -> Result<Option<Author>> {
        self.record("find_author_by_email");
        self.inner.find_author_by_email(email)
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        self.record("email_exists");
        self.inner.email_exists(email)
    }

    fn list_authors(&self) -> Result<Vec<Author>> {
        self.record("list_authors");
        self.inner.list_authors()
    }

    fn count_authors(&self) -> Result<u64> {
        self.record("count_authors");
        self.inner.count_authors()
    }

    fn insert_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry> {
        self.record("insert_entry");
        self.inner.insert_entry(entry)
    }

    fn update_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry> {
        self.record("update_entry");
        self.inner.update_entry(entry)
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<bool> {
        self.record("delete_entry");
        self.inner.delete_entry(id)
    }

    fn find_entry(&self, id: EntryId) -> Result<Option<DiaryEntry>> {
        self.record("find_entry");
        self.inner.find_entry(id)
    }

    fn list_entries(&self) -> Result<Vec<DiaryEntry>> {
        self.record("list_entries");
        self.inner.list_entries()
    }

    fn entries_by_author(&self, id: AuthorId) -> Result<Vec<DiaryEntry>> {
        self.record("entries_by_author");
        self.inner.entries_by_author(id)
    }

    fn search_entries(&self, keyword: &str) -> Result<Vec<DiaryEntry>> {
        self.record("search_entries");
        self.inner.search_entries(keyword)
    }

    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DiaryEntry>> {
        self.record("entries_between");
        self.inner.entries_between(start, end)
    }

    fn count_entries(&self) -> Result<u64> {
        self.record("count_entries");
        self.inner.count_entries()
    }

    fn count_entries_by_author(&self, id: AuthorId) -> Result<u64> {
        self.record("count_entries_by_author");
        self.inner.count_entries_by_author(id)
    }

    fn entry_counts_by_author(&self) -> Result<Vec<(Author, u64)>> {
        self.record("entry_counts_by_author");
        self.inner.entry_counts_by_author()
    }
}
