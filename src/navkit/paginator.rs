//! Page-at-a-time picker over a snapshot of items.
//!
//! The page arithmetic is exposed as plain methods so it can be tested without
//! a console; [`Paginator::show`] and [`Paginator::show_read_only`] wrap it in
//! the interactive loop.

use std::io;

use tracing::debug;

use crate::console::Console;
use crate::style::Tone;

pub const DEFAULT_PAGE_SIZE: usize = 9;

/// How items are numbered on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Numbering {
    /// Every page starts again at 1, so choices stay single digits.
    #[default]
    PageLocal,
    /// Numbers continue across pages (page 2 of size 9 starts at 10).
    Global,
}

/// A parsed line of pager input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerInput {
    Next,
    Previous,
    Back,
    Select(usize),
    Unknown,
}

pub struct Paginator<'a, T> {
    items: Vec<T>,
    title: String,
    formatter: Box<dyn Fn(&T) -> String + 'a>,
    page_size: usize,
    current_page: usize,
    numbering: Numbering,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new<F>(items: Vec<T>, title: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&T) -> String + 'a,
    {
        Self {
            items,
            title: title.into(),
            formatter: Box::new(formatter),
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 0,
            numbering: Numbering::default(),
        }
    }

    /// Sets the page size, treating 0 as 1, and rewinds to the first page.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self.current_page = 0;
        self
    }

    pub fn numbering(mut self, numbering: Numbering) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.len().div_ceil(self.page_size).max(1)
    }

    /// Zero-based index of the page on screen.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    fn window(&self) -> (usize, usize) {
        let start = self.current_page * self.page_size;
        let end = (start + self.page_size).min(self.len());
        (start, end)
    }

    pub fn page_items(&self) -> &[T] {
        let (start, end) = self.window();
        &self.items[start..end]
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Moves forward one page. Returns false, leaving the page alone, on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    fn first_number(&self) -> usize {
        match self.numbering {
            Numbering::PageLocal => 1,
            Numbering::Global => self.window().0 + 1,
        }
    }

    /// Maps a number shown on the current page back to its item.
    pub fn resolve(&self, choice: usize) -> Option<&T> {
        let offset = choice.checked_sub(self.first_number())?;
        self.page_items().get(offset)
    }

    pub fn interpret(line: &str) -> PagerInput {
        let input = line.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("b") {
            return PagerInput::Back;
        }
        if input.eq_ignore_ascii_case("n") {
            return PagerInput::Next;
        }
        if input.eq_ignore_ascii_case("p") {
            return PagerInput::Previous;
        }
        match input.parse::<usize>() {
            Ok(n) => PagerInput::Select(n),
            Err(_) => PagerInput::Unknown,
        }
    }

    /// Lets the user page through the items and pick one. Returns `None` when
    /// the user backs out, input ends, or there was nothing to pick.
    pub fn show(&mut self, console: &mut Console) -> io::Result<Option<T>>
    where
        T: Clone,
    {
        if self.is_empty() {
            console.line("No items found.")?;
            return Ok(None);
        }

        loop {
            self.render(console, true)?;
            let Some(line) = console.read_line()? else {
                return Ok(None);
            };

            match Self::interpret(&line) {
                PagerInput::Next => self.turn(true),
                PagerInput::Previous => self.turn(false),
                PagerInput::Back => return Ok(None),
                PagerInput::Select(n) => match self.resolve(n) {
                    Some(item) => return Ok(Some(item.clone())),
                    None => console.error("Invalid selection")?,
                },
                PagerInput::Unknown => console.error("Invalid input")?,
            }
        }
    }

    /// Like [`show`](Self::show) but only for browsing.
    pub fn show_read_only(&mut self, console: &mut Console) -> io::Result<()> {
        if self.is_empty() {
            console.line("No items found.")?;
            return Ok(());
        }

        loop {
            self.render(console, false)?;
            let Some(line) = console.read_line()? else {
                return Ok(());
            };

            match Self::interpret(&line) {
                PagerInput::Next => self.turn(true),
                PagerInput::Previous => self.turn(false),
                PagerInput::Back => return Ok(()),
                PagerInput::Select(_) | PagerInput::Unknown => console.error("Invalid input")?,
            }
        }
    }

    fn turn(&mut self, forward: bool) {
        let moved = if forward {
            self.next_page()
        } else {
            self.previous_page()
        };
        debug!(title = %self.title, page = self.current_page + 1, moved, "page turn");
    }

    fn render(&self, console: &mut Console, selectable: bool) -> io::Result<()> {
        console.line(&Tone::Accent.paint(&format!(
            "== {} (Page {} of {}) ==",
            self.title,
            self.current_page + 1,
            self.page_count()
        )))?;

        let first = self.first_number();
        for (i, item) in self.page_items().iter().enumerate() {
            let number = Tone::Accent.paint(&format!("[{}]", first + i));
            console.line(&format!("{} - {}", number, (self.formatter)(item)))?;
        }

        let count = self.len();
        console.line(&format!(
            "Total: {} item{}",
            count,
            if count == 1 { "" } else { "s" }
        ))?;

        let mut commands = Vec::new();
        if self.has_next() {
            commands.push("[N] Next".to_string());
        }
        if self.has_previous() {
            commands.push("[P] Previous".to_string());
        }
        if selectable {
            let shown = self.page_items().len();
            commands.push(format!("[{}-{}] Select", first, first + shown - 1));
        }
        commands.push("[B] Back".to_string());
        console.line(&commands.join("  "))?;
        console.text("-> ")
    }
}
