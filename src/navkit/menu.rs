//! Numbered menus with an automatic Back/Exit line.
//!
//! A menu keeps showing itself until the user leaves it. Options either run a
//! closure against the caller's context or open a nested menu. Plain items
//! carry no behavior; [`Menu::select`] hands the choice back to the caller:
//!
//! ```text
//! == Author: Ada Lovelace ==
//! [1] - View details
//! [2] - Edit author
//! [b] - Back
//! ->
//! ```

use std::io;

use tracing::debug;

use crate::console::Interactive;
use crate::style::Tone;

/// What an option asks of its menu after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    /// Show the menu again.
    Stay,
    /// Leave the menu, for example after deleting the thing it was about.
    Close,
}

/// How [`Menu::show`] or [`Menu::select`] was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    Back,
    /// The user confirmed leaving a root menu.
    Exit,
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Root,
    Sub,
}

impl Kind {
    fn token(self) -> &'static str {
        match self {
            Kind::Root => "q",
            Kind::Sub => "b",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Kind::Root => "Exit",
            Kind::Sub => "Back",
        }
    }
}

type OptionFn<'a, C, E> = Box<dyn FnMut(&mut C) -> Result<MenuFlow, E> + 'a>;

pub enum MenuTarget<'a, C, E> {
    Action(OptionFn<'a, C, E>),
    Submenu(Menu<'a, C, E>),
    /// Nothing to run; only meaningful with [`Menu::select`].
    Item,
}

/// Result of a single [`Menu::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index of the chosen option.
    Picked(usize),
    Left(MenuExit),
}

pub struct MenuOption<'a, C, E> {
    label: String,
    tone: Tone,
    target: MenuTarget<'a, C, E>,
}

impl<'a, C, E> MenuOption<'a, C, E> {
    pub fn action<F>(label: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&mut C) -> Result<MenuFlow, E> + 'a,
    {
        Self {
            label: label.into(),
            tone: Tone::Accent,
            target: MenuTarget::Action(Box::new(f)),
        }
    }

    pub fn submenu(label: impl Into<String>, menu: Menu<'a, C, E>) -> Self {
        Self {
            label: label.into(),
            tone: Tone::Accent,
            target: MenuTarget::Submenu(menu),
        }
    }

    pub fn item(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tone: Tone::Accent,
            target: MenuTarget::Item,
        }
    }

    /// Color of the option number. Destructive options use [`Tone::Danger`].
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

enum Choice {
    Leave,
    Pick(usize),
    Invalid,
}

pub struct Menu<'a, C, E> {
    title: String,
    kind: Kind,
    options: Vec<MenuOption<'a, C, E>>,
}

impl<'a, C, E> Menu<'a, C, E> {
    /// A top-level menu. Leaving it asks for confirmation.
    pub fn root(title: impl Into<String>) -> Self {
        Self::with_kind(title.into(), Kind::Root)
    }

    pub fn sub(title: impl Into<String>) -> Self {
        Self::with_kind(title.into(), Kind::Sub)
    }

    fn with_kind(title: String, kind: Kind) -> Self {
        Self {
            title,
            kind,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: MenuOption<'a, C, E>) -> Self {
        self.options.push(option);
        self
    }

    pub fn action<F>(self, label: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&mut C) -> Result<MenuFlow, E> + 'a,
    {
        self.option(MenuOption::action(label, f))
    }

    pub fn submenu(self, label: impl Into<String>, menu: Menu<'a, C, E>) -> Self {
        self.option(MenuOption::submenu(label, menu))
    }

    pub fn item(self, label: impl Into<String>) -> Self {
        self.option(MenuOption::item(label))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn interpret(&self, line: &str) -> Choice {
        let input = line.trim();
        if input.eq_ignore_ascii_case(self.kind.token()) {
            return Choice::Leave;
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=self.len()).contains(&n) => Choice::Pick(n - 1),
            _ => Choice::Invalid,
        }
    }
}

impl<'a, C, E> Menu<'a, C, E>
where
    C: Interactive,
    E: From<io::Error>,
{
    /// Runs the menu until the user goes back, confirms exit, or input ends.
    pub fn show(&mut self, ctx: &mut C) -> Result<MenuExit, E> {
        loop {
            let index = match self.select(ctx)? {
                Selection::Picked(index) => index,
                Selection::Left(exit) => return Ok(exit),
            };
            match &mut self.options[index].target {
                MenuTarget::Action(f) => {
                    if f(ctx)? == MenuFlow::Close {
                        return Ok(MenuExit::Back);
                    }
                }
                MenuTarget::Submenu(menu) => {
                    if menu.show(ctx)? == MenuExit::InputClosed {
                        return Ok(MenuExit::InputClosed);
                    }
                }
                MenuTarget::Item => {}
            }
        }
    }

    /// Shows the menu until the user picks an option or leaves it. Invalid
    /// input is reported and the menu is drawn again. Nothing is run.
    pub fn select(&self, ctx: &mut C) -> Result<Selection, E> {
        loop {
            self.render(ctx)?;

            let Some(line) = ctx.console().read_line()? else {
                return Ok(Selection::Left(MenuExit::InputClosed));
            };

            match self.interpret(&line) {
                Choice::Leave => match self.kind {
                    Kind::Sub => return Ok(Selection::Left(MenuExit::Back)),
                    Kind::Root => {
                        if ctx.console().confirm("Are you sure you want to exit?")? {
                            return Ok(Selection::Left(MenuExit::Exit));
                        }
                        if ctx.console().is_exhausted() {
                            return Ok(Selection::Left(MenuExit::InputClosed));
                        }
                    }
                },
                Choice::Pick(index) => {
                    let label = self.options[index].label();
                    debug!(menu = %self.title, option = %label, "menu option selected");
                    return Ok(Selection::Picked(index));
                }
                Choice::Invalid => ctx.console().error("Invalid input")?,
            }
        }
    }

    fn render(&self, ctx: &mut C) -> io::Result<()> {
        let console = ctx.console();
        if !self.title.is_empty() {
            console.line(&self.title)?;
        }
        for (i, option) in self.options.iter().enumerate() {
            let number = option.tone.paint(&format!("[{}]", i + 1));
            console.line(&format!("{} - {}", number, option.label))?;
        }
        let leave = Tone::Danger.paint(&format!("[{}]", self.kind.token()));
        console.line(&format!("{} - {}", leave, self.kind.label()))?;
        console.text("-> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Console, Transcript};

    type TestMenu<'a> = Menu<'a, Console, io::Error>;

    fn counting_menu(hits: &std::cell::Cell<u32>) -> TestMenu<'_> {
        Menu::sub("== Test ==").action("Count", move |_: &mut Console| {
            hits.set(hits.get() + 1);
            Ok(MenuFlow::Stay)
        })
    }

    fn run(menu: &mut TestMenu<'_>, script: &str) -> (MenuExit, Transcript) {
        let (mut console, transcript) = Console::scripted(script);
        let exit = menu.show(&mut console).unwrap();
        (exit, transcript)
    }

    #[test]
    fn test_renders_numbered_options_and_back_line() {
        let hits = std::cell::Cell::new(0);
        let mut menu = counting_menu(&hits);
        let (_, transcript) = run(&mut menu, "b\n");
        assert_eq!(transcript.contents(), "== Test ==\n[1] - Count\n[b] - Back\n-> ");
    }

    #[test]
    fn test_runs_option_and_shows_menu_again() {
        let hits = std::cell::Cell::new(0);
        let mut menu = counting_menu(&hits);
        let (exit, transcript) = run(&mut menu, "1\n1\nb\n");
        assert_eq!(exit, MenuExit::Back);
        assert_eq!(hits.get(), 2);
        assert_eq!(transcript.contents().matches("== Test ==").count(), 3);
    }

    #[test]
    fn test_back_token_ignores_case() {
        let hits = std::cell::Cell::new(0);
        let mut menu = counting_menu(&hits);
        let (exit, _) = run(&mut menu, "B\n");
        assert_eq!(exit, MenuExit::Back);
    }

    #[test]
    fn test_out_of_range_and_garbage_are_rejected() {
        let hits = std::cell::Cell::new(0);
        let mut menu = counting_menu(&hits);
        let (exit, transcript) = run(&mut menu, "0\n2\nabc\nb\n");
        assert_eq!(exit, MenuExit::Back);
        assert_eq!(hits.get(), 0);
        assert_eq!(transcript.contents().matches("Invalid input").count(), 3);
    }

    #[test]
    fn test_end_of_input_counts_as_leaving() {
        let hits = std::cell::Cell::new(0);
        let mut menu = counting_menu(&hits);
        let (exit, _) = run(&mut menu, "1\n");
        assert_eq!(exit, MenuExit::InputClosed);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_close_flow_unwinds_menu() {
        let mut menu: TestMenu<'_> =
            Menu::sub("== Item ==").action("Delete", |_: &mut Console| Ok(MenuFlow::Close));
        let (exit, transcript) = run(&mut menu, "1\n");
        assert_eq!(exit, MenuExit::Back);
        assert_eq!(transcript.contents().matches("== Item ==").count(), 1);
    }

    #[test]
    fn test_root_menu_asks_before_exit() {
        let mut menu: TestMenu<'_> = Menu::root("== Main ==");
        let (exit, transcript) = run(&mut menu, "q\nn\nQ\ny\n");
        assert_eq!(exit, MenuExit::Exit);
        let out = transcript.contents();
        assert!(out.contains("[q] - Exit"));
        assert_eq!(out.matches("Are you sure you want to exit? (y/n): ").count(), 2);
    }

    #[test]
    fn test_submenu_returns_to_parent() {
        let hits = std::cell::Cell::new(0);
        let mut menu: TestMenu<'_> = Menu::sub("== Parent ==").submenu("Child", counting_menu(&hits));
        let (exit, transcript) = run(&mut menu, "1\n1\nb\nb\n");
        assert_eq!(exit, MenuExit::Back);
        assert_eq!(hits.get(), 1);
        assert_eq!(transcript.contents().matches("== Parent ==").count(), 2);
    }

    #[test]
    fn test_input_closed_in_submenu_unwinds_parent() {
        let hits = std::cell::Cell::new(0);
        let mut menu: TestMenu<'_> = Menu::sub("== Parent ==").submenu("Child", counting_menu(&hits));
        let (exit, transcript) = run(&mut menu, "1\n");
        assert_eq!(exit, MenuExit::InputClosed);
        assert_eq!(transcript.contents().matches("== Parent ==").count(), 1);
    }

    #[test]
    fn test_select_returns_picked_index() {
        let menu: TestMenu<'_> = Menu::root("== Main ==").item("Entries").item("Authors");
        assert_eq!(menu.len(), 2);
        let (mut console, transcript) = Console::scripted("2\n");
        assert_eq!(menu.select(&mut console).unwrap(), Selection::Picked(1));
        assert_eq!(
            transcript.contents(),
            "== Main ==\n[1] - Entries\n[2] - Authors\n[q] - Exit\n-> "
        );
    }

    #[test]
    fn test_select_redraws_after_invalid_input() {
        let menu: TestMenu<'_> = Menu::sub("== Pick ==").item("Only");
        let (mut console, transcript) = Console::scripted("7\nzz\n1\n");
        assert_eq!(menu.select(&mut console).unwrap(), Selection::Picked(0));
        let out = transcript.contents();
        assert_eq!(out.matches("Invalid input").count(), 2);
        assert_eq!(out.matches("== Pick ==").count(), 3);
    }

    #[test]
    fn test_select_leaving() {
        let menu: TestMenu<'_> = Menu::root("== Main ==").item("Entries");
        let (mut console, transcript) = Console::scripted("q\nn\nq\ny\n");
        assert_eq!(
            menu.select(&mut console).unwrap(),
            Selection::Left(MenuExit::Exit)
        );
        assert_eq!(transcript.contents().matches("== Main ==").count(), 2);

        let (mut console, _) = Console::scripted("q\nn\n");
        assert_eq!(
            menu.select(&mut console).unwrap(),
            Selection::Left(MenuExit::InputClosed)
        );

        let empty: TestMenu<'_> = Menu::sub("");
        assert!(empty.is_empty());
        let (mut console, transcript) = Console::scripted("b\n");
        assert_eq!(
            empty.select(&mut console).unwrap(),
            Selection::Left(MenuExit::Back)
        );
        assert_eq!(transcript.contents(), "[b] - Back\n-> ");
    }

    #[test]
    fn test_show_skips_plain_items() {
        let hits = std::cell::Cell::new(0);
        let mut menu = counting_menu(&hits).item("Nothing");
        let (exit, transcript) = run(&mut menu, "2\n1\nb\n");
        assert_eq!(exit, MenuExit::Back);
        assert_eq!(hits.get(), 1);
        assert_eq!(transcript.contents().matches("== Test ==").count(), 3);
    }

    #[test]
    fn test_option_errors_propagate() {
        let mut menu: TestMenu<'_> = Menu::sub("").action("Fail", |_: &mut Console| {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        });
        let (mut console, _) = Console::scripted("1\n");
        let err = menu.show(&mut console).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
