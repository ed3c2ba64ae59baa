//! Screen-to-screen navigation.
//!
//! Each screen is an [`Action`]: it runs once and hands back the screen to
//! show next. Going "back" is not a stack pop; a screen that can return
//! somewhere is given that destination as an ordinary value when it is built.

use std::fmt;
use std::io;
use std::rc::Rc;

use tracing::debug;

use crate::console::Interactive;

pub const DEFAULT_FAREWELL: &str = "Goodbye!";

/// Result of running one screen: the next screen, or `None` to stop.
pub type Step<C, E> = Result<Option<Action<C, E>>, E>;

pub struct Action<C, E> {
    name: &'static str,
    run: Rc<dyn Fn(&mut C) -> Step<C, E>>,
}

impl<C, E> Action<C, E> {
    pub fn new<F>(name: &'static str, run: F) -> Self
    where
        F: Fn(&mut C) -> Step<C, E> + 'static,
    {
        Self {
            name,
            run: Rc::new(run),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn execute(&self, ctx: &mut C) -> Step<C, E> {
        (self.run)(ctx)
    }
}

impl<C, E> Clone for Action<C, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            run: Rc::clone(&self.run),
        }
    }
}

impl<C, E> fmt::Debug for Action<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

pub struct Router<C, E> {
    current: Option<Action<C, E>>,
    farewell: String,
}

impl<C, E> Router<C, E>
where
    C: Interactive,
    E: From<io::Error>,
{
    pub fn new(initial: Action<C, E>) -> Self {
        Self {
            current: Some(initial),
            farewell: DEFAULT_FAREWELL.to_string(),
        }
    }

    pub fn with_farewell(mut self, farewell: impl Into<String>) -> Self {
        self.farewell = farewell.into();
        self
    }

    /// Runs screens until one returns `None`, then prints the farewell.
    /// Returns how many screens were run.
    pub fn run(mut self, ctx: &mut C) -> Result<usize, E> {
        let mut visited = 0;
        while let Some(action) = self.current.take() {
            debug!(screen = action.name(), "entering screen");
            self.current = action.execute(ctx)?;
            visited += 1;
            ctx.console().blank()?;
        }
        debug!(visited, "router finished");
        ctx.console().line(&self.farewell)?;
        Ok(visited)
    }
}
