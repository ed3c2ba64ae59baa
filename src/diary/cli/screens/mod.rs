//! Interactive screens.
//!
//! Every screen is a [`Screen`] built by a plain function. A screen runs once,
//! talks to the user through `app.console`, calls the API, and returns the
//! next screen. Input errors are reported on the console and never end the
//! session; only I/O failures propagate to the router.

mod authors;
mod entries;

use diary::error::DiaryError;
use navkit::{Menu, MenuExit, MenuOption, Selection, Step};
use tracing::{debug, warn};

use super::app::{App, Screen};
use super::render;

/// Menus over the app. Detail views attach actions; plain screens `select`.
type ActionMenu<'a> = Menu<'a, App, DiaryError>;
type ActionOption<'a> = MenuOption<'a, App, DiaryError>;

/// Wraps a screen body so that domain errors are shown instead of fatal.
fn screen<F>(name: &'static str, body: F) -> Screen
where
    F: Fn(&mut App) -> Step<App, DiaryError> + 'static,
{
    Screen::new(name, move |app: &mut App| match body(app) {
        Err(DiaryError::Io(error)) => Err(DiaryError::Io(error)),
        Err(error) => {
            if error.is_validation() {
                debug!(screen = name, %error, "input rejected");
            } else {
                warn!(screen = name, %error, "screen failed");
            }
            app.console.error(&error.to_string())?;
            Ok(Some(main_menu()))
        }
        ok => ok,
    })
}

pub(super) fn main_menu() -> Screen {
    screen("main", |app| {
        let choice = ActionMenu::root("== Diary ==")
            .item("Diary entries")
            .item("Authors")
            .item("Statistics")
            .select(app)?;
        Ok(match choice {
            Selection::Picked(0) => Some(entries::entries_menu()),
            Selection::Picked(1) => Some(authors::authors_menu()),
            Selection::Picked(_) => Some(statistics()),
            Selection::Left(_) => None,
        })
    })
}

fn statistics() -> Screen {
    screen("statistics", |app| {
        let stats = app.api.statistics()?;
        app.console.line(&render::statistics(&stats))?;
        app.console.blank()?;
        Ok(match ActionMenu::sub("").select(app)? {
            Selection::Left(MenuExit::InputClosed) => None,
            _ => Some(main_menu()),
        })
    })
}
