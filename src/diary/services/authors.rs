use tracing::info;

use crate::error::{DiaryError, Result};
use crate::model::{Author, AuthorId};
use crate::store::DataStore;

/// Creates an author, or returns `None` when the email is already taken.
pub fn create<S: DataStore>(
    store: &mut S,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<Option<Author>> {
    let author = Author::new(first_name, last_name, email)?;
    if store.email_exists(author.email())? {
        info!(email = author.email(), "author not created: email taken");
        return Ok(None);
    }

    let saved = store.insert_author(author)?;
    info!(author_id = ?saved.id(), "author created");
    Ok(Some(saved))
}

/// Like [`create`], but a taken email is an error.
pub fn create_or_err<S: DataStore>(
    store: &mut S,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<Author> {
    create(store, first_name, last_name, email)?
        .ok_or_else(|| DiaryError::DuplicateEmail(Author::normalize_email(email)))
}

pub fn find_by_id<S: DataStore>(store: &S, id: AuthorId) -> Result<Option<Author>> {
    store.find_author(id)
}

pub fn find_by_email<S: DataStore>(store: &S, email: &str) -> Result<Option<Author>> {
    if email.trim().is_empty() {
        return Ok(None);
    }
    store.find_author_by_email(email)
}

pub fn list<S: DataStore>(store: &S) -> Result<Vec<Author>> {
    store.list_authors()
}

pub fn email_exists<S: DataStore>(store: &S, email: &str) -> Result<bool> {
    if email.trim().is_empty() {
        return Ok(false);
    }
    store.email_exists(email)
}

/// Saves changes to an author. The email must not belong to another author.
pub fn update<S: DataStore>(store: &mut S, author: Author) -> Result<Author> {
    if let Some(owner) = store.find_author_by_email(author.email())? {
        if owner.id() != author.id() {
            return Err(DiaryError::DuplicateEmail(author.email().to_string()));
        }
    }

    let saved = store.update_author(author)?;
    info!(author_id = ?saved.id(), "author updated");
    Ok(saved)
}

/// Deletes an author who has no diary entries.
pub fn delete<S: DataStore>(store: &mut S, author: &Author) -> Result<()> {
    let id = author
        .id()
        .ok_or_else(|| DiaryError::NotFound(format!("author {}", author.email())))?;

    let count = store.count_entries_by_author(id)?;
    if count > 0 {
        return Err(DiaryError::AuthorHasEntries {
            name: author.full_name(),
            count,
        });
    }

    if !store.delete_author(id)? {
        return Err(DiaryError::NotFound(format!("author {}", id)));
    }
    info!(author_id = id.0, "author deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::entries;
    use crate::services::test_support::RecordingStore;
    use crate::store::sqlite::SqliteStore;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn creates_author_with_normalized_fields() {
        let mut store = store();
        let author = create(&mut store, " John ", "Doe", "John@Example.com")
            .unwrap()
            .unwrap();
        assert_eq!(author.email(), "john@example.com");
        assert!(author.id().is_some());
    }

    #[test]
    fn duplicate_email_differing_in_case_is_rejected() {
        let mut store = store();
        create(&mut store, "John", "Doe", "john@example.com").unwrap();

        let second = create(&mut store, "Johnny", "Doe", "JOHN@EXAMPLE.COM").unwrap();
        assert!(second.is_none());

        let err = create_or_err(&mut store, "Johnny", "Doe", "JOHN@EXAMPLE.COM").unwrap_err();
        assert_eq!(
            err.to_string(),
            "An author with email 'john@example.com' already exists"
        );
        assert_eq!(list(&store).unwrap().len(), 1);
    }

    #[test]
    fn invalid_input_is_a_validation_error() {
        let mut store = store();
        let err = create(&mut store, "John", "Doe", "nope").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn lookups_return_none_when_missing() {
        let store = store();
        assert!(find_by_email(&store, "ghost@example.com").unwrap().is_none());
        assert!(find_by_email(&store, "  ").unwrap().is_none());
        assert!(find_by_id(&store, AuthorId(9)).unwrap().is_none());
        assert!(!email_exists(&store, "").unwrap());
    }

    #[test]
    fn update_allows_keeping_own_email() {
        let mut store = store();
        let mut author = create_or_err(&mut store, "John", "Doe", "john@example.com").unwrap();
        author.set_last_name("Smith").unwrap();
        let updated = update(&mut store, author).unwrap();
        assert_eq!(updated.last_name(), "Smith");
    }

    #[test]
    fn update_rejects_email_of_another_author() {
        let mut store = store();
        create_or_err(&mut store, "John", "Doe", "john@example.com").unwrap();
        let mut jane = create_or_err(&mut store, "Jane", "Doe", "jane@example.com").unwrap();
        jane.set_email("JOHN@example.com").unwrap();

        assert!(matches!(
            update(&mut store, jane),
            Err(DiaryError::DuplicateEmail(_))
        ));
    }

    #[test]
    fn delete_is_refused_before_reaching_store_when_author_has_entries() {
        let mut store = RecordingStore::new();
        let author = create_or_err(&mut store, "John", "Doe", "john@example.com").unwrap();
        entries::create(&mut store, "Day one", &author, "text").unwrap();
        store.clear_calls();

        let err = delete(&mut store, &author).unwrap_err();
        assert!(matches!(
            err,
            DiaryError::AuthorHasEntries { ref name, count: 1 } if name == "John Doe"
        ));
        assert!(!store.calls().contains(&"delete_author"));
        assert!(find_by_id(&store, author.id().unwrap()).unwrap().is_some());
    }

    #[test]
    fn delete_without_entries_removes_author() {
        let mut store = RecordingStore::new();
        let author = create_or_err(&mut store, "John", "Doe", "john@example.com").unwrap();

        delete(&mut store, &author).unwrap();
        assert!(store.calls().contains(&"delete_author"));
        assert!(find_by_id(&store, author.id().unwrap()).unwrap().is_none());
        assert!(find_by_email(&store, "john@example.com").unwrap().is_none());
    }

    #[test]
    fn deleting_unsaved_author_is_not_found() {
        let mut store = store();
        let draft = Author::new("John", "Doe", "john@example.com").unwrap();
        assert!(matches!(delete(&mut store, &draft), Err(DiaryError::NotFound(_))));
    }
}
