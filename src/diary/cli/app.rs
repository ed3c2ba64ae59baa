use diary::api::DiaryApi;
use diary::config::{DiaryConfig, ListNumbering, MultilineTerminator};
use diary::error::{DiaryError, Result};
use diary::store::sqlite::SqliteStore;
use navkit::{Console, Interactive, MultilineEnd, Numbering, Paginator};

/// Presentation settings resolved from config and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub page_size: usize,
    pub numbering: Numbering,
    pub multiline_end: MultilineEnd,
}

impl Settings {
    pub fn from_config(config: &DiaryConfig, page_size: Option<usize>) -> Self {
        Self {
            page_size: page_size.unwrap_or(config.page_size).max(1),
            numbering: match config.numbering {
                ListNumbering::PageLocal => Numbering::PageLocal,
                ListNumbering::Global => Numbering::Global,
            },
            multiline_end: match config.multiline_end {
                MultilineTerminator::EmptyLine => MultilineEnd::EmptyLine,
                MultilineTerminator::TwoEmptyLines => MultilineEnd::TwoEmptyLines,
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&DiaryConfig::default(), None)
    }
}

/// Everything a screen works with.
pub struct App {
    pub console: Console,
    pub api: DiaryApi<SqliteStore>,
    pub settings: Settings,
}

impl App {
    pub fn new(console: Console, api: DiaryApi<SqliteStore>, settings: Settings) -> Self {
        Self {
            console,
            api,
            settings,
        }
    }

    /// A pager configured with the user's page size and numbering.
    pub fn pager<'a, T>(
        &self,
        items: Vec<T>,
        title: impl Into<String>,
        formatter: impl Fn(&T) -> String + 'a,
    ) -> Paginator<'a, T> {
        Paginator::new(items, title, formatter)
            .page_size(self.settings.page_size)
            .numbering(self.settings.numbering)
    }

    pub fn close(self) -> Result<()> {
        self.api.into_store().close()
    }
}

impl Interactive for App {
    fn console(&mut self) -> &mut Console {
        &mut self.console
    }
}

pub type Screen = navkit::Action<App, DiaryError>;

#[cfg(test)]
pub(crate) fn scripted_app(script: &str) -> (App, navkit::Transcript) {
    let (console, transcript) = Console::scripted(script);
    let store = SqliteStore::open_in_memory().unwrap();
    let app = App::new(console, DiaryApi::new(store), Settings::default());
    (app, transcript)
}
