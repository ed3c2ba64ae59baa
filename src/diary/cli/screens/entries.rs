use std::cell::{Cell, RefCell};

use chrono::NaiveDate;
use diary::api::{parse_date, DATE_INPUT_FORMAT};
use diary::error::{DiaryError, Result, ValidationError};
use diary::model::{Author, DiaryEntry};
use navkit::{MenuExit, MenuFlow, Selection, Step, Tone};

use super::{authors, main_menu, screen, ActionMenu, ActionOption};
use crate::cli::app::{App, Screen};
use crate::cli::render;

pub(super) fn entries_menu() -> Screen {
    screen("entries", |app| {
        let choice = ActionMenu::sub("== Diary Entries ==")
            .item("List all entries")
            .item("Write a new entry")
            .item("Search entries")
            .select(app)?;
        Ok(match choice {
            Selection::Picked(0) => Some(list_entries()),
            Selection::Picked(1) => Some(create_entry()),
            Selection::Picked(_) => Some(search_menu()),
            Selection::Left(MenuExit::InputClosed) => None,
            Selection::Left(_) => Some(main_menu()),
        })
    })
}

fn list_entries() -> Screen {
    screen("list_entries", |app| {
        let all = app.api.list_entries()?;
        let picked = app
            .pager(all, "Diary Entries", render::entry_row)
            .show(&mut app.console)?;
        Ok(Some(match picked {
            Some(entry) => entry_detail(entry, list_entries()),
            None => entries_menu(),
        }))
    })
}

/// Actions on one entry. Leaving goes to `back`.
fn entry_detail(entry: DiaryEntry, back: Screen) -> Screen {
    screen("entry_detail", move |app| {
        let current = match entry.id() {
            Some(id) => app.api.find_entry(id)?,
            None => None,
        };
        let Some(current) = current else {
            app.console.warning("That entry no longer exists.")?;
            return Ok(Some(back.clone()));
        };

        let title = format!("== Entry: {} ==", current.title());
        let selected = RefCell::new(current);
        let renamed = Cell::new(false);
        let exit = entry_menu(title, &selected, &renamed).show(app)?;

        Ok(match exit {
            MenuExit::InputClosed => None,
            _ if renamed.get() => Some(entry_detail(selected.into_inner(), back.clone())),
            _ => Some(back.clone()),
        })
    })
}

fn entry_menu<'a>(
    title: String,
    selected: &'a RefCell<DiaryEntry>,
    renamed: &'a Cell<bool>,
) -> ActionMenu<'a> {
    ActionMenu::sub(title)
        .action("View full entry", move |app: &mut App| {
            app.console.line(&render::entry_full(&selected.borrow()))?;
            app.console.blank()?;
            app.console.pause()?;
            Ok(MenuFlow::Stay)
        })
        .action("Edit entry", move |app: &mut App| {
            let before = selected.borrow().clone();
            let Some(saved) = edit_entry(app, before.clone())? else {
                return Ok(MenuFlow::Stay);
            };
            let title_changed = saved.title() != before.title();
            *selected.borrow_mut() = saved;
            if title_changed {
                // reopen so the menu title shows the new name
                renamed.set(true);
                return Ok(MenuFlow::Close);
            }
            Ok(MenuFlow::Stay)
        })
        .option(
            ActionOption::action("Delete entry", move |app: &mut App| {
                let entry = selected.borrow().clone();
                if !app
                    .console
                    .confirm(&format!("Delete \"{}\"?", entry.title()))?
                {
                    app.console.info("Delete cancelled.")?;
                    return Ok(MenuFlow::Stay);
                }
                app.api.delete_entry(&entry)?;
                app.console
                    .success(&format!("Deleted \"{}\".", entry.title()))?;
                Ok(MenuFlow::Close)
            })
            .tone(Tone::Danger),
        )
}

/// Asks for a new title and optionally new content. Returns the saved entry,
/// or `None` when nothing was changed.
fn edit_entry(app: &mut App, mut entry: DiaryEntry) -> Result<Option<DiaryEntry>> {
    let mut changed = false;

    let Some(title) = app.console.prompt(&format!(
        "Title [{}] (leave empty to keep): ",
        entry.title()
    ))?
    else {
        return Ok(None);
    };
    if !title.is_empty() && title != entry.title() {
        entry.set_title(&title)?;
        changed = true;
    }

    if app.console.confirm("Replace the content?")? {
        match app
            .console
            .read_multiline("New content", app.settings.multiline_end)?
        {
            Some(content) => {
                entry.set_content(&content)?;
                changed = true;
            }
            None => app.console.info("Content kept.")?,
        }
    }

    if !changed {
        app.console.info("Nothing changed.")?;
        return Ok(None);
    }
    let saved = app.api.update_entry(entry)?;
    app.console.success("Entry updated.")?;
    Ok(Some(saved))
}

fn create_entry() -> Screen {
    screen("create_entry", |app| {
        let Some(author) = pick_author(app)? else {
            return Ok(Some(entries_menu()));
        };
        app.console
            .line(&format!("Writing as {}", author.full_name()))?;

        let title = app.console.prompt("Title: ")?.unwrap_or_default();
        if title.is_empty() {
            app.console.warning("Cancelled: title cannot be empty.")?;
            return Ok(Some(entries_menu()));
        }

        let Some(content) = app
            .console
            .read_multiline("Content", app.settings.multiline_end)?
        else {
            app.console.warning("Cancelled: content cannot be empty.")?;
            return Ok(Some(entries_menu()));
        };

        let entry = app.api.create_entry(&title, &author, &content)?;
        app.console
            .success(&format!("Saved \"{}\".", entry.title()))?;
        Ok(Some(entries_menu()))
    })
}

/// Lets the user pick the author of a new entry, offering to create one when
/// there are none.
fn pick_author(app: &mut App) -> Result<Option<Author>> {
    let all = app.api.list_authors()?;
    if all.is_empty() {
        app.console.warning("There are no authors yet.")?;
        if !app.console.confirm("Create one now?")? {
            return Ok(None);
        }
        return authors::author_form(app);
    }

    let picked = app
        .pager(all, "Choose Author", render::author_row)
        .show(&mut app.console)?;
    Ok(picked)
}

fn search_menu() -> Screen {
    screen("search", |app| {
        let choice = ActionMenu::sub("== Search Entries ==")
            .item("By keyword")
            .item("By date")
            .item("By date range")
            .select(app)?;

        match choice {
            Selection::Picked(0) => {
                let keyword = app.console.prompt("Keyword: ")?.unwrap_or_default();
                if keyword.is_empty() {
                    return Ok(Some(search_menu()));
                }
                Ok(Some(keyword_results(keyword)))
            }
            Selection::Picked(1) => Ok(Some(match prompt_date(app, "Date (dd-mm-yyyy): ")? {
                Some(day) => date_results(day, day),
                None => search_menu(),
            })),
            Selection::Picked(_) => {
                let Some(start) = prompt_date(app, "Start date (dd-mm-yyyy): ")? else {
                    return Ok(Some(search_menu()));
                };
                loop {
                    let Some(end) = prompt_date(app, "End date (dd-mm-yyyy): ")? else {
                        return Ok(Some(search_menu()));
                    };
                    if end >= start {
                        return Ok(Some(date_results(start, end)));
                    }
                    app.console
                        .error(&ValidationError::InvalidDateRange.to_string())?;
                }
            }
            Selection::Left(MenuExit::InputClosed) => Ok(None),
            Selection::Left(_) => Ok(Some(entries_menu())),
        }
    })
}

/// Re-prompts until a valid date is typed. Blank input gives `None`.
fn prompt_date(app: &mut App, label: &str) -> Result<Option<NaiveDate>> {
    loop {
        let answer = app.console.prompt(label)?.unwrap_or_default();
        if answer.is_empty() {
            return Ok(None);
        }
        match parse_date(&answer) {
            Ok(date) => return Ok(Some(date)),
            Err(error) => app.console.error(&error.to_string())?,
        }
    }
}

fn keyword_results(keyword: String) -> Screen {
    screen("keyword_results", move |app| {
        let found = app.api.search_entries(&keyword)?;
        let title = format!("Results for \"{}\"", keyword);
        show_results(app, found, title, keyword_results(keyword.clone()))
    })
}

fn date_results(start: NaiveDate, end: NaiveDate) -> Screen {
    screen("date_results", move |app| {
        let (found, title) = if start == end {
            (
                app.api.entries_on(start)?,
                format!("Entries on {}", start.format(DATE_INPUT_FORMAT)),
            )
        } else {
            (
                app.api.entries_between(start, end)?,
                format!(
                    "Entries from {} to {}",
                    start.format(DATE_INPUT_FORMAT),
                    end.format(DATE_INPUT_FORMAT)
                ),
            )
        };
        show_results(app, found, title, date_results(start, end))
    })
}

/// Pages through search results. `again` re-runs the same search, so the
/// detail screen comes back to fresh results.
fn show_results(
    app: &mut App,
    found: Vec<DiaryEntry>,
    title: String,
    again: Screen,
) -> Step<App, DiaryError> {
    if found.is_empty() {
        app.console.warning("No matching entries found.")?;
        return Ok(Some(search_menu()));
    }
    let picked = app
        .pager(found, title, render::entry_row)
        .show(&mut app.console)?;
    Ok(Some(match picked {
        Some(entry) => entry_detail(entry, again),
        None => search_menu(),
    }))
}
