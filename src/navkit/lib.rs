//! # Navkit - Blocking Console Navigation
//!
//! Building blocks for line-oriented terminal applications: numbered menus,
//! a paginated picker and a screen router. Everything is synchronous and reads
//! exactly one line of input at a time.
//!
//! ## The Pieces
//!
//! - [`Console`] owns the input and output streams. All prompts, confirmations
//!   and colored messages go through it, which lets tests script a whole session
//!   with [`Console::scripted`].
//! - [`Menu`] renders `[n] - label` options plus an automatic Back/Exit line and
//!   runs the chosen [`MenuOption`] until the user leaves. [`Menu::select`]
//!   stops after one valid pick and reports it as a [`Selection`].
//! - [`Paginator`] shows a snapshot of items one page at a time and returns the
//!   item the user picked.
//! - [`Router`] drives a chain of [`Action`]s. Each action runs one screen and
//!   returns the next one, or `None` to finish.
//!
//! ## Quick Example
//!
//! ```rust
//! use navkit::{Action, Console, Router};
//!
//! let (mut console, transcript) = Console::scripted("x\n");
//!
//! let farewell: Action<Console, std::io::Error> = Action::new("farewell", |c: &mut Console| {
//!     c.line("see you")?;
//!     Ok(None)
//! });
//! let home: Action<Console, std::io::Error> = Action::new("home", move |c: &mut Console| {
//!     c.prompt("-> ")?;
//!     Ok(Some(farewell.clone()))
//! });
//!
//! Router::new(home).run(&mut console).unwrap();
//! assert!(transcript.contents().ends_with("Goodbye!\n"));
//! ```
//!
//! ## End of Input
//!
//! A closed input stream is never an error. [`Console::read_line`] returns
//! `None`, menus and pagers treat that as "back", and a router whose screens
//! all honor it winds down to its farewell line.

pub mod console;
pub mod menu;
pub mod paginator;
pub mod router;
pub mod style;
pub mod text;

pub use console::{Console, Interactive, MultilineEnd, Transcript};
pub use menu::{Menu, MenuExit, MenuFlow, MenuOption, MenuTarget, Selection};
pub use paginator::{Numbering, PagerInput, Paginator, DEFAULT_PAGE_SIZE};
pub use router::{Action, Router, Step, DEFAULT_FAREWELL};
pub use style::Tone;
pub use text::{single_line, truncate_to_width};
