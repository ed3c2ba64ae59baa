use chrono::NaiveDate;
use tracing::info;

use crate::error::{DiaryError, Result, ValidationError};
use crate::model::{Author, DiaryEntry, EntryId};
use crate::store::DataStore;

pub fn create<S: DataStore>(
    store: &mut S,
    title: &str,
    author: &Author,
    content: &str,
) -> Result<DiaryEntry> {
    let entry = DiaryEntry::new(title, author.clone(), content)?;
    let saved = store.insert_entry(entry)?;
    info!(entry_id = ?saved.id(), author_id = ?author.id(), "entry created");
    Ok(saved)
}

pub fn find_by_id<S: DataStore>(store: &S, id: EntryId) -> Result<Option<DiaryEntry>> {
    store.find_entry(id)
}

/// All entries, newest first.
pub fn list<S: DataStore>(store: &S) -> Result<Vec<DiaryEntry>> {
    store.list_entries()
}

pub fn by_author<S: DataStore>(store: &S, author: &Author) -> Result<Vec<DiaryEntry>> {
    match author.id() {
        Some(id) => store.entries_by_author(id),
        None => Ok(Vec::new()),
    }
}

/// Entries mentioning `keyword` in title or content. A blank keyword matches nothing.
pub fn search<S: DataStore>(store: &S, keyword: &str) -> Result<Vec<DiaryEntry>> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Ok(Vec::new());
    }
    store.search_entries(keyword)
}

pub fn on_date<S: DataStore>(store: &S, date: NaiveDate) -> Result<Vec<DiaryEntry>> {
    store.entries_between(date, date)
}

/// Entries created between two local dates, both included.
pub fn between<S: DataStore>(store: &S, start: NaiveDate, end: NaiveDate) -> Result<Vec<DiaryEntry>> {
    if end < start {
        return Err(ValidationError::InvalidDateRange.into());
    }
    store.entries_between(start, end)
}

pub fn update_title<S: DataStore>(store: &mut S, mut entry: DiaryEntry, title: &str) -> Result<DiaryEntry> {
    entry.set_title(title)?;
    update(store, entry)
}

pub fn update_content<S: DataStore>(
    store: &mut S,
    mut entry: DiaryEntry,
    content: &str,
) -> Result<DiaryEntry> {
    entry.set_content(content)?;
    update(store, entry)
}

pub fn update<S: DataStore>(store: &mut S, entry: DiaryEntry) -> Result<DiaryEntry> {
    let saved = store.update_entry(entry)?;
    info!(entry_id = ?saved.id(), "entry updated");
    Ok(saved)
}

pub fn delete<S: DataStore>(store: &mut S, entry: &DiaryEntry) -> Result<()> {
    let id = entry
        .id()
        .ok_or_else(|| DiaryError::NotFound(format!("entry '{}'", entry.title())))?;
    if !delete_by_id(store, id)? {
        return Err(DiaryError::NotFound(format!("diary entry {}", id)));
    }
    Ok(())
}

/// Returns whether an entry with `id` existed.
pub fn delete_by_id<S: DataStore>(store: &mut S, id: EntryId) -> Result<bool> {
    let deleted = store.delete_entry(id)?;
    if deleted {
        info!(entry_id = id.0, "entry deleted");
    }
    Ok(deleted)
}

pub fn count<S: DataStore>(store: &S) -> Result<u64> {
    store.count_entries()
}

pub fn count_by_author<S: DataStore>(store: &S, author: &Author) -> Result<u64> {
    match author.id() {
        Some(id) => store.count_entries_by_author(id),
        None => Ok(0),
    }
}
