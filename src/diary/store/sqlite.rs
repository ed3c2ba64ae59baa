//! SQLite storage for authors and diary entries

use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::DataStore;
use crate::error::{DiaryError, Result};
use crate::model::{Author, AuthorId, DiaryEntry, EntryId};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS diary_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        author_id INTEGER NOT NULL REFERENCES authors(id),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_diary_entries_author ON diary_entries(author_id);
    CREATE INDEX IF NOT EXISTS idx_diary_entries_created ON diary_entries(created_at);
";

const AUTHOR_COLUMNS: &str = "a.id, a.first_name, a.last_name, a.email, a.created_at, a.updated_at";

const ENTRY_SELECT: &str = "
    SELECT e.id, e.title, e.content, e.created_at, e.updated_at,
           a.id, a.first_name, a.last_name, a.email, a.created_at, a.updated_at
    FROM diary_entries e
    JOIN authors a ON a.id = e.author_id";

const NEWEST_FIRST: &str = "ORDER BY e.created_at DESC, e.id DESC";

/// SQL function folding text with Rust's Unicode lowercasing. SQLite's own
/// `lower()` only folds ASCII, which would not agree with [`like_pattern`].
const FOLD_CASE: &str = "fold_case";

/// Fixed-width UTC text, so string order is time order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// SQLite-backed [`DataStore`]
pub struct SqliteStore {
    conn: Connection,
    clock: Clock,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "opening database");
        Self::with_connection(Connection::open(path)?)
    }

    /// Create an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.create_scalar_function(
            FOLD_CASE,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            clock: Box::new(Utc::now),
        })
    }

    /// Replace the source of `created_at`/`updated_at` values.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        debug!("closing database");
        self.conn.close().map_err(|(_, e)| DiaryError::Database(e))
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)().trunc_subsecs(6)
    }

    fn query_entries(&self, filter: &str, args: impl rusqlite::Params) -> Result<Vec<DiaryEntry>> {
        let sql = format!("{} {} {}", ENTRY_SELECT, filter, NEWEST_FIRST);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(args, EntryRow::read)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    fn count(&self, sql: &str, args: impl rusqlite::Params) -> Result<u64> {
        let n: i64 = self.conn.query_row(sql, args, |row| row.get(0))?;
        Ok(n.max(0) as u64)
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DiaryError::Store(format!("invalid timestamp '{}': {}", raw, e)))
}

/// Start of `date` in the local time zone, as UTC.
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

/// `%keyword%` with LIKE wildcards in the keyword escaped by `\`.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn saved_author_id(author: &Author) -> Result<AuthorId> {
    author
        .id()
        .ok_or_else(|| DiaryError::Store(format!("author {} has not been saved", author.email())))
}

struct AuthorRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    created_at: String,
    updated_at: String,
}

impl AuthorRow {
    fn read_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            first_name: row.get(offset + 1)?,
            last_name: row.get(offset + 2)?,
            email: row.get(offset + 3)?,
            created_at: row.get(offset + 4)?,
            updated_at: row.get(offset + 5)?,
        })
    }

    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Self::read_at(row, 0)
    }

    fn into_author(self) -> Result<Author> {
        Ok(Author::restore(
            AuthorId(self.id),
            self.first_name,
            self.last_name,
            self.email,
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        ))
    }
}

struct EntryRow {
    id: i64,
    title: String,
    content: String,
    created_at: String,
    updated_at: String,
    author: AuthorRow,
}

impl EntryRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            author: AuthorRow::read_at(row, 5)?,
        })
    }

    fn into_entry(self) -> Result<DiaryEntry> {
        Ok(DiaryEntry::restore(
            EntryId(self.id),
            self.title,
            self.author.into_author()?,
            self.content,
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        ))
    }
}

impl DataStore for SqliteStore {
    fn insert_author(&mut self, mut author: Author) -> Result<Author> {
        let now = self.now();
        let stamp = format_timestamp(now);
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO authors (first_name, last_name, email, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![author.first_name(), author.last_name(), author.email(), stamp],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                DiaryError::DuplicateEmail(author.email().to_string())
            } else {
                DiaryError::Database(e)
            }
        })?;
        let id = AuthorId(tx.last_insert_rowid());
        tx.commit()?;

        debug!(author_id = id.0, "inserted author");
        author.mark_saved(id, now);
        Ok(author)
    }

    fn update_author(&mut self, mut author: Author) -> Result<Author> {
        let id = saved_author_id(&author)?;
        let now = self.now();
        let tx = self.conn.transaction()?;
        let rows = tx
            .execute(
                "UPDATE authors SET first_name = ?1, last_name = ?2, email = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![
                    author.first_name(),
                    author.last_name(),
                    author.email(),
                    format_timestamp(now),
                    id.0
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DiaryError::DuplicateEmail(author.email().to_string())
                } else {
                    DiaryError::Database(e)
                }
            })?;
        if rows == 0 {
            return Err(DiaryError::NotFound(format!("author {}", id)));
        }
        tx.commit()?;

        debug!(author_id = id.0, "updated author");
        author.touch(now);
        Ok(author)
    }

    fn delete_author(&mut self, id: AuthorId) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let rows = tx.execute("DELETE FROM authors WHERE id = ?1", params![id.0])?;
        tx.commit()?;
        debug!(author_id = id.0, deleted = rows > 0, "delete author");
        Ok(rows > 0)
    }

    fn find_author(&self, id: AuthorId) -> Result<Option<Author>> {
        let sql = format!("SELECT {} FROM authors a WHERE a.id = ?1", AUTHOR_COLUMNS);
        self.conn
            .query_row(&sql, params![id.0], AuthorRow::read)
            .optional()?
            .map(AuthorRow::into_author)
            .transpose()
    }

    fn find_author_by_email(&self, email: &str) -> Result<Option<Author>> {
        let sql = format!("SELECT {} FROM authors a WHERE a.email = ?1", AUTHOR_COLUMNS);
        self.conn
            .query_row(&sql, params![Author::normalize_email(email)], AuthorRow::read)
            .optional()?
            .map(AuthorRow::into_author)
            .transpose()
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        let n = self.count(
            "SELECT COUNT(*) FROM authors WHERE email = ?1",
            params![Author::normalize_email(email)],
        )?;
        Ok(n > 0)
    }

    fn list_authors(&self) -> Result<Vec<Author>> {
        let sql = format!("SELECT {} FROM authors a ORDER BY a.id", AUTHOR_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], AuthorRow::read)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(AuthorRow::into_author).collect()
    }

    fn count_authors(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM authors", [])
    }

    fn insert_entry(&mut self, mut entry: DiaryEntry) -> Result<DiaryEntry> {
        let author_id = saved_author_id(entry.author())?;
        let now = self.now();
        let stamp = format_timestamp(now);
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO diary_entries (title, content, author_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![entry.title(), entry.content(), author_id.0, stamp],
        )?;
        let id = EntryId(tx.last_insert_rowid());
        tx.commit()?;

        debug!(entry_id = id.0, author_id = author_id.0, "inserted entry");
        entry.mark_saved(id, now);
        Ok(entry)
    }

    fn update_entry(&mut self, mut entry: DiaryEntry) -> Result<DiaryEntry> {
        let id = entry
            .id()
            .ok_or_else(|| DiaryError::Store("entry has not been saved".to_string()))?;
        let author_id = saved_author_id(entry.author())?;
        let now = self.now();
        let tx = self.conn.transaction()?;
        let rows = tx.execute(
            "UPDATE diary_entries SET title = ?1, content = ?2, author_id = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                entry.title(),
                entry.content(),
                author_id.0,
                format_timestamp(now),
                id.0
            ],
        )?;
        if rows == 0 {
            return Err(DiaryError::NotFound(format!("diary entry {}", id)));
        }
        tx.commit()?;

        debug!(entry_id = id.0, "updated entry");
        entry.touch(now);
        Ok(entry)
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let rows = tx.execute("DELETE FROM diary_entries WHERE id = ?1", params![id.0])?;
        tx.commit()?;
        debug!(entry_id = id.0, deleted = rows > 0, "delete entry");
        Ok(rows > 0)
    }

    fn find_entry(&self, id: EntryId) -> Result<Option<DiaryEntry>> {
        let sql = format!("{} WHERE e.id = ?1", ENTRY_SELECT);
        self.conn
            .query_row(&sql, params![id.0], EntryRow::read)
            .optional()?
            .map(EntryRow::into_entry)
            .transpose()
    }

    fn list_entries(&self) -> Result<Vec<DiaryEntry>> {
        self.query_entries("", [])
    }

    fn entries_by_author(&self, id: AuthorId) -> Result<Vec<DiaryEntry>> {
        self.query_entries("WHERE e.author_id = ?1", params![id.0])
    }

    fn search_entries(&self, keyword: &str) -> Result<Vec<DiaryEntry>> {
        debug!(keyword, "searching entries");
        self.query_entries(
            r"WHERE fold_case(e.title) LIKE ?1 ESCAPE '\' OR fold_case(e.content) LIKE ?1 ESCAPE '\'",
            params![like_pattern(keyword)],
        )
    }

    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DiaryEntry>> {
        let from = local_midnight(start);
        let until = match end.succ_opt() {
            Some(next) => format_timestamp(local_midnight(next)),
            None => "9999-12-31T23:59:59.999999Z".to_string(),
        };
        self.query_entries(
            "WHERE e.created_at >= ?1 AND e.created_at < ?2",
            params![format_timestamp(from), until],
        )
    }

    fn count_entries(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM diary_entries", [])
    }

    fn count_entries_by_author(&self, id: AuthorId) -> Result<u64> {
        self.count(
            "SELECT COUNT(*) FROM diary_entries WHERE author_id = ?1",
            params![id.0],
        )
    }

    fn entry_counts_by_author(&self) -> Result<Vec<(Author, u64)>> {
        let sql = format!(
            "SELECT {}, COUNT(e.id)
             FROM authors a
             LEFT JOIN diary_entries e ON e.author_id = a.id
             GROUP BY a.id
             ORDER BY a.id",
            AUTHOR_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let author = AuthorRow::read(row)?;
                let count: i64 = row.get(6)?;
                Ok((author, count))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(author, count)| -> Result<(Author, u64)> {
                Ok((author.into_author()?, count.max(0) as u64))
            })
            .collect()
    }
}
