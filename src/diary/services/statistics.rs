use serde::Serialize;

use crate::error::Result;
use crate::model::Author;
use crate::store::DataStore;

#[derive(Debug, Clone, Serialize)]
pub struct AuthorTally {
    pub author: Author,
    pub entries: u64,
}

/// Totals across the whole diary.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_authors: u64,
    pub total_entries: u64,
    /// One row per author, zero counts included, in creation order.
    pub entries_per_author: Vec<AuthorTally>,
}

impl Statistics {
    /// Mean entries per author, or `None` when there are no authors.
    pub fn average_per_author(&self) -> Option<f64> {
        if self.total_authors == 0 {
            return None;
        }
        Some(self.total_entries as f64 / self.total_authors as f64)
    }
}

pub fn collect<S: DataStore>(store: &S) -> Result<Statistics> {
    let entries_per_author = store
        .entry_counts_by_author()?
        .into_iter()
        .map(|(author, entries)| AuthorTally { author, entries })
        .collect();

    Ok(Statistics {
        total_authors: store.count_authors()?,
        total_entries: store.count_entries()?,
        entries_per_author,
    })
}
