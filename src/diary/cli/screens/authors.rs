use std::cell::RefCell;

use diary::error::{DiaryError, Result, ValidationError};
use diary::model::Author;
use navkit::{MenuExit, MenuFlow, Selection, Tone};

use super::{main_menu, screen, ActionMenu, ActionOption};
use crate::cli::app::{App, Screen};
use crate::cli::render;

pub(super) fn authors_menu() -> Screen {
    screen("authors", |app| {
        let choice = ActionMenu::sub("== Authors ==")
            .item("List authors")
            .item("Add author")
            .item("Find author by email")
            .select(app)?;
        Ok(match choice {
            Selection::Picked(0) => Some(list_authors()),
            Selection::Picked(1) => Some(create_author()),
            Selection::Picked(_) => Some(find_by_email()),
            Selection::Left(MenuExit::InputClosed) => None,
            Selection::Left(_) => Some(main_menu()),
        })
    })
}

fn list_authors() -> Screen {
    screen("list_authors", |app| {
        let all = app.api.list_authors()?;
        let picked = app
            .pager(all, "Authors", render::author_row)
            .show(&mut app.console)?;
        Ok(Some(match picked {
            Some(author) => author_detail(author, list_authors()),
            None => authors_menu(),
        }))
    })
}

fn create_author() -> Screen {
    screen("create_author", |app| {
        author_form(app)?;
        Ok(Some(authors_menu()))
    })
}

/// Asks for a new author and saves it. Returns `None` when the user cancels.
pub(super) fn author_form(app: &mut App) -> Result<Option<Author>> {
    let Some(first_name) = required(app, "First name: ", "First name")? else {
        return Ok(None);
    };
    let Some(last_name) = required(app, "Last name: ", "Last name")? else {
        return Ok(None);
    };
    let Some(email) = prompt_email(app, "Email: ", None)? else {
        app.console.warning("Cancelled: no email given.")?;
        return Ok(None);
    };

    match app.api.create_author(&first_name, &last_name, &email)? {
        Some(author) => {
            app.console
                .success(&format!("Author created: {}", author))?;
            Ok(Some(author))
        }
        None => {
            app.console.error("That email is already in use.")?;
            Ok(None)
        }
    }
}

fn required(app: &mut App, label: &str, field: &'static str) -> Result<Option<String>> {
    let answer = app.console.prompt(label)?.unwrap_or_default();
    if answer.is_empty() {
        app.console
            .warning(&format!("Cancelled: {}", ValidationError::Blank(field)))?;
        return Ok(None);
    }
    Ok(Some(answer))
}

/// Re-prompts while the email is malformed or held by someone other than
/// `owner`. Blank input gives `None`.
fn prompt_email(app: &mut App, label: &str, owner: Option<&Author>) -> Result<Option<String>> {
    loop {
        let answer = app.console.prompt(label)?.unwrap_or_default();
        if answer.is_empty() {
            return Ok(None);
        }
        if !Author::is_valid_email(&answer) {
            let error = ValidationError::InvalidEmail(Author::normalize_email(&answer));
            app.console.error(&error.to_string())?;
            continue;
        }
        match app.api.find_author_by_email(&answer)? {
            Some(holder) if owner.map_or(true, |o| o.id() != holder.id()) => {
                app.console.error("That email is already in use.")?;
            }
            _ => return Ok(Some(answer)),
        }
    }
}

fn find_by_email() -> Screen {
    screen("find_author", |app| {
        let email = app.console.prompt("Email: ")?.unwrap_or_default();
        if email.is_empty() {
            return Ok(Some(authors_menu()));
        }
        match app.api.find_author_by_email(&email)? {
            Some(author) => Ok(Some(author_detail(author, authors_menu()))),
            None => {
                app.console.warning("Author not found.")?;
                Ok(Some(authors_menu()))
            }
        }
    })
}

fn author_detail(author: Author, back: Screen) -> Screen {
    screen("author_detail", move |app| {
        let current = match author.id() {
            Some(id) => app.api.find_author(id)?,
            None => None,
        };
        let Some(current) = current else {
            app.console.warning("That author no longer exists.")?;
            return Ok(Some(back.clone()));
        };

        let title = format!("== Author: {} ==", current.full_name());
        let selected = RefCell::new(current);
        let exit = author_menu(title, &selected).show(app)?;
        Ok(match exit {
            MenuExit::InputClosed => None,
            _ => Some(back.clone()),
        })
    })
}

fn author_menu<'a>(title: String, selected: &'a RefCell<Author>) -> ActionMenu<'a> {
    ActionMenu::sub(title)
        .action("View details", move |app: &mut App| {
            let author = selected.borrow().clone();
            let count = app.api.count_entries_by_author(&author)?;
            app.console.line(&render::author_full(&author, count))?;
            app.console.blank()?;
            app.console.pause()?;
            Ok(MenuFlow::Stay)
        })
        .action("View entries", move |app: &mut App| {
            let author = selected.borrow().clone();
            let entries = app.api.entries_by_author(&author)?;
            app.pager(
                entries,
                format!("Entries by {}", author.full_name()),
                render::entry_preview_row,
            )
            .show_read_only(&mut app.console)?;
            Ok(MenuFlow::Stay)
        })
        .submenu("Edit author", edit_menu(selected))
        .option(
            ActionOption::action("Delete author", move |app: &mut App| {
                let author = selected.borrow().clone();
                let count = app.api.count_entries_by_author(&author)?;
                if count > 0 {
                    let refused = DiaryError::AuthorHasEntries {
                        name: author.full_name(),
                        count,
                    };
                    app.console.error(&refused.to_string())?;
                    return Ok(MenuFlow::Stay);
                }
                if !app
                    .console
                    .confirm(&format!("Delete {}?", author.full_name()))?
                {
                    app.console.info("Delete cancelled.")?;
                    return Ok(MenuFlow::Stay);
                }
                app.api.delete_author(&author)?;
                app.console
                    .success(&format!("Deleted {}.", author.full_name()))?;
                Ok(MenuFlow::Close)
            })
            .tone(Tone::Danger),
        )
}

fn edit_menu(selected: &RefCell<Author>) -> ActionMenu<'_> {
    ActionMenu::sub("== Edit Author ==")
        .action("First name", move |app: &mut App| {
            let mut author = selected.borrow().clone();
            let label = format!("First name [{}] (leave empty to keep): ", author.first_name());
            let Some(value) = replacement(app, &label, author.first_name())? else {
                return Ok(MenuFlow::Stay);
            };
            author.set_first_name(&value)?;
            save(app, selected, author)
        })
        .action("Last name", move |app: &mut App| {
            let mut author = selected.borrow().clone();
            let label = format!("Last name [{}] (leave empty to keep): ", author.last_name());
            let Some(value) = replacement(app, &label, author.last_name())? else {
                return Ok(MenuFlow::Stay);
            };
            author.set_last_name(&value)?;
            save(app, selected, author)
        })
        .action("Email", move |app: &mut App| {
            let mut author = selected.borrow().clone();
            let label = format!("Email [{}] (leave empty to keep): ", author.email());
            let Some(email) = prompt_email(app, &label, Some(&author))? else {
                return Ok(MenuFlow::Stay);
            };
            if Author::normalize_email(&email) == author.email() {
                app.console.info("Nothing changed.")?;
                return Ok(MenuFlow::Stay);
            }
            author.set_email(&email)?;
            save(app, selected, author)
        })
}

/// A new value for a field, or `None` when the answer is blank or unchanged.
fn replacement(app: &mut App, label: &str, current: &str) -> Result<Option<String>> {
    let answer = app.console.prompt(label)?.unwrap_or_default();
    if answer.is_empty() || answer == current {
        return Ok(None);
    }
    Ok(Some(answer))
}

fn save(app: &mut App, selected: &RefCell<Author>, author: Author) -> Result<MenuFlow> {
    let saved = app.api.update_author(author)?;
    app.console
        .success(&format!("Author updated: {}", saved))?;
    *selected.borrow_mut() = saved;
    Ok(MenuFlow::Stay)
}

#[cfg(test)]
mod tests {
    use navkit::Router;

    use super::*;
    use crate::cli::app::scripted_app;

    fn run(app: &mut App) {
        Router::new(main_menu()).run(app).unwrap();
    }

    fn ada(app: &mut App) -> Author {
        app.api
            .create_author("Ada", "Lovelace", "ada@example.com")
            .unwrap()
            .unwrap()
    }

    #[test]
    fn add_author_through_menus() {
        let (mut app, transcript) = scripted_app("2\n2\nAda\nLovelace\nada@example.com\nb\nq\ny\n");
        run(&mut app);

        assert!(transcript
            .contents()
            .contains("Author created: Ada Lovelace (ada@example.com)"));
        assert_eq!(app.api.list_authors().unwrap().len(), 1);
    }

    #[test]
    fn email_is_reprompted_until_valid_and_free() {
        let (mut app, transcript) = scripted_app(
            "2\n2\nJane\nDoe\nnot-an-email\nADA@EXAMPLE.COM\njane@example.com\nb\nq\ny\n",
        );
        ada(&mut app);
        run(&mut app);

        let out = transcript.contents();
        assert!(out.contains("Invalid email format: not-an-email"));
        assert!(out.contains("That email is already in use."));
        assert!(out.contains("Author created: Jane Doe (jane@example.com)"));
        assert_eq!(app.api.list_authors().unwrap().len(), 2);
    }

    #[test]
    fn blank_first_name_cancels() {
        let (mut app, transcript) = scripted_app("2\n2\n\nb\nq\ny\n");
        run(&mut app);

        assert!(transcript
            .contents()
            .contains("Cancelled: First name cannot be empty"));
        assert!(app.api.list_authors().unwrap().is_empty());
    }

    #[test]
    fn delete_refused_while_entries_exist() {
        let (mut app, transcript) = scripted_app("2\n1\n1\n4\nb\nb\nb\nq\ny\n");
        let author = ada(&mut app);
        app.api.create_entry("Engines", &author, "Notes").unwrap();
        run(&mut app);

        let out = transcript.contents();
        assert!(out.contains("Cannot delete Ada Lovelace"));
        assert!(!out.contains("Delete Ada Lovelace? (y/n)"));
        assert_eq!(app.api.list_authors().unwrap().len(), 1);
    }

    #[test]
    fn delete_author_without_entries() {
        let (mut app, transcript) = scripted_app("2\n1\n1\n4\ny\nb\nq\ny\n");
        ada(&mut app);
        run(&mut app);

        let out = transcript.contents();
        assert!(out.contains("Deleted Ada Lovelace."));
        assert!(out.contains("No items found."));
        assert!(app
            .api
            .find_author_by_email("ada@example.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn find_by_email_and_change_it() {
        let (mut app, transcript) =
            scripted_app("2\n3\nADA@example.com\n3\n3\nada@lovelace.org\nb\nb\nb\nq\ny\n");
        ada(&mut app);
        run(&mut app);

        let out = transcript.contents();
        assert!(out.contains("== Author: Ada Lovelace =="));
        assert!(out.contains("== Edit Author =="));
        assert!(out.contains("Author updated: Ada Lovelace (ada@lovelace.org)"));
        assert!(app
            .api
            .find_author_by_email("ada@lovelace.org")
            .unwrap()
            .is_some());
    }

    #[test]
    fn rename_keeps_email() {
        let (mut app, transcript) = scripted_app("2\n1\n1\n3\n1\nAugusta\nb\nb\nb\nb\nq\ny\n");
        ada(&mut app);
        run(&mut app);

        assert!(transcript
            .contents()
            .contains("Author updated: Augusta Lovelace (ada@example.com)"));
        let saved = app.api.find_author_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(saved.first_name(), "Augusta");
    }

    #[test]
    fn unknown_email_is_reported() {
        let (mut app, transcript) = scripted_app("2\n3\nnobody@example.com\nb\nq\ny\n");
        run(&mut app);
        assert!(transcript.contents().contains("Author not found."));
    }

    #[test]
    fn entries_are_listed_read_only() {
        let (mut app, transcript) = scripted_app("2\n1\n1\n2\nb\nb\nb\nb\nq\ny\n");
        let author = ada(&mut app);
        app.api
            .create_entry("Engines", &author, "Analytical\nnotes")
            .unwrap();
        run(&mut app);

        let out = transcript.contents();
        assert!(out.contains("== Entries by Ada Lovelace (Page 1 of 1) =="));
        assert!(out.contains("[1] - Engines - Analytical notes"));
        assert!(out.contains("[B] Back"));
    }
}
