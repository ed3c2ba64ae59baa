//! Line-based input and output.
//!
//! [`Console`] is the only place that touches the terminal. Production code
//! builds it with [`Console::stdio`]; tests feed it a script and read back a
//! [`Transcript`].

use std::cell::RefCell;
use std::io::{self, BufRead, Cursor, Write};
use std::rc::Rc;

use crate::style::Tone;

/// How free-form text entry knows the user is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultilineEnd {
    /// A single empty line ends the text.
    #[default]
    EmptyLine,
    /// Two consecutive empty lines end the text, so paragraphs can be separated.
    TwoEmptyLines,
}

impl MultilineEnd {
    fn hint(self) -> &'static str {
        match self {
            MultilineEnd::EmptyLine => "finish with an empty line",
            MultilineEnd::TwoEmptyLines => "finish with two empty lines",
        }
    }

    fn blank_lines_needed(self) -> usize {
        match self {
            MultilineEnd::EmptyLine => 1,
            MultilineEnd::TwoEmptyLines => 2,
        }
    }
}

/// Anything that owns a [`Console`]. Menus and the router only need this.
pub trait Interactive {
    fn console(&mut self) -> &mut Console;
}

pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    exhausted: bool,
}

impl Console {
    pub fn new<R, W>(input: R, output: W) -> Self
    where
        R: BufRead + 'static,
        W: Write + 'static,
    {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            exhausted: false,
        }
    }

    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }

    /// A console that reads `script` and records everything written.
    pub fn scripted(script: &str) -> (Self, Transcript) {
        let transcript = Transcript::default();
        let console = Self::new(
            Cursor::new(script.as_bytes().to_vec()),
            transcript.clone(),
        );
        (console, transcript)
    }

    /// Reads one line without its line terminator. `None` means the input is
    /// closed; every later call returns `None` as well.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            self.exhausted = true;
            return Ok(None);
        }

        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(Some(buf))
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Writes `text` without a newline and flushes, for prompts.
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.line("")
    }

    /// Shows `message` and returns the trimmed answer.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.text(message)?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Asks a yes/no question. Only `y` and `yes` count as yes.
    pub fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{} (y/n): ", message))?;
        Ok(answer
            .map(|a| a.to_ascii_lowercase())
            .is_some_and(|a| a == "y" || a == "yes"))
    }

    pub fn pause(&mut self) -> io::Result<()> {
        self.text("Press Enter to continue...")?;
        self.read_line()?;
        Ok(())
    }

    /// Collects free-form text until the terminator configured by `end`.
    /// Returns `None` when nothing but whitespace was entered.
    pub fn read_multiline(&mut self, header: &str, end: MultilineEnd) -> io::Result<Option<String>> {
        self.line(&format!("{} ({}):", header, end.hint()))?;

        let needed = end.blank_lines_needed();
        let mut lines = Vec::new();
        let mut blanks = 0;

        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                blanks += 1;
                if blanks >= needed {
                    break;
                }
            } else {
                blanks = 0;
            }
            lines.push(line);
        }

        let text = lines.join("\n");
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.line(&Tone::Success.paint(message))
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.line(&Tone::Danger.paint(message))
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.line(&Tone::Warning.paint(message))
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.line(message)
    }
}

impl Interactive for Console {
    fn console(&mut self) -> &mut Console {
        self
    }
}

/// Shared buffer behind a scripted console.
#[derive(Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
    /// Everything written so far, with ANSI codes removed.
    pub fn contents(&self) -> String {
        let raw = String::from_utf8_lossy(&self.0.borrow()).into_owned();
        console::strip_ansi_codes(&raw).into_owned()
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_strips_terminators() {
        let (mut console, _) = Console::scripted("first\r\nsecond\n");
        assert_eq!(console.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let (mut console, _) = Console::scripted("only\n");
        console.read_line().unwrap();
        assert_eq!(console.read_line().unwrap(), None);
        assert!(console.is_exhausted());
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_prompt_trims_answer_and_echoes_message() {
        let (mut console, transcript) = Console::scripted("  Ada  \n");
        let answer = console.prompt("Name: ").unwrap();
        assert_eq!(answer.as_deref(), Some("Ada"));
        assert_eq!(transcript.contents(), "Name: ");
    }

    #[test]
    fn test_confirm_accepts_y_and_yes_only() {
        let (mut console, _) = Console::scripted("YES\ny\nno\nsure\n");
        assert!(console.confirm("Sure?").unwrap());
        assert!(console.confirm("Sure?").unwrap());
        assert!(!console.confirm("Sure?").unwrap());
        assert!(!console.confirm("Sure?").unwrap());
        assert!(!console.confirm("Sure?").unwrap());
    }

    #[test]
    fn test_multiline_stops_at_first_empty_line() {
        let (mut console, _) = Console::scripted("line one\nline two\n\nignored\n");
        let text = console
            .read_multiline("Content", MultilineEnd::EmptyLine)
            .unwrap();
        assert_eq!(text.as_deref(), Some("line one\nline two"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("ignored"));
    }

    #[test]
    fn test_multiline_keeps_single_blank_between_paragraphs() {
        let (mut console, _) = Console::scripted("para one\n\npara two\n\n\nafter\n");
        let text = console
            .read_multiline("Content", MultilineEnd::TwoEmptyLines)
            .unwrap();
        assert_eq!(text.as_deref(), Some("para one\n\npara two"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("after"));
    }

    #[test]
    fn test_multiline_blank_input_is_none() {
        let (mut console, _) = Console::scripted("   \n");
        let text = console
            .read_multiline("Content", MultilineEnd::EmptyLine)
            .unwrap();
        assert_eq!(text, None);
    }

    #[test]
    fn test_multiline_accepts_text_cut_by_end_of_input() {
        let (mut console, _) = Console::scripted("no terminator");
        let text = console
            .read_multiline("Content", MultilineEnd::TwoEmptyLines)
            .unwrap();
        assert_eq!(text.as_deref(), Some("no terminator"));
    }
}
