//! Color roles for console output.
//!
//! Styling goes through `console::Style`, so ANSI codes are dropped
//! automatically when stdout is not a terminal or when colors were disabled
//! with `console::set_colors_enabled(false)`.

use console::Style;

/// The role a piece of text plays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    /// Option numbers and headings.
    Accent,
    Success,
    Warning,
    /// Errors and destructive options.
    Danger,
    Muted,
}

impl Tone {
    pub fn style(self) -> Style {
        match self {
            Tone::Plain => Style::new(),
            Tone::Accent => Style::new().cyan(),
            Tone::Success => Style::new().green(),
            Tone::Warning => Style::new().yellow(),
            Tone::Danger => Style::new().red(),
            Tone::Muted => Style::new().dim(),
        }
    }

    pub fn paint(self, text: &str) -> String {
        self.style().apply_to(text).to_string()
    }
}
