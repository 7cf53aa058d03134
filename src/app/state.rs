//! Application state structures.
//!
//! - **`ViewState`**: which of the three views is showing, with the data that
//!   only exists inside that view
//! - **`TextInputState`**: the plot editor
//! - **`ScrollState`**: scroll position of the results list
//! - **`Notice`**: the one-line message shown above the editor
//! - **`LayoutState`**: dimensions cached once per frame

use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use tui_textarea::{CursorMove, TextArea};

use crate::app::layout::AppLayout;
use crate::core::progress::INITIAL_STATUS;
use crate::core::{AnalysisResult, MAX_PLOT_CHARS};

/// Placeholder shown in the empty editor.
pub const PLOT_PLACEHOLDER: &str = "Describe your plot, storyline, or story idea here... \
     (minimum 50 characters for meaningful analysis)";

/// Tab stop spacing, the same as the editor's default.
const TAB_WIDTH: usize = 4;

/// The view currently on screen.
///
/// `Results` owns its [`AnalysisResult`], so there is no way to be in the
/// results view without one.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// Editing the plot.
    #[default]
    Input,
    /// Waiting for the service, with simulated progress.
    Analyzing(AnalyzingState),
    /// Browsing the ranked films.
    Results(ResultsState),
}

impl ViewState {
    /// Short name used in logs and tests.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Analyzing(_) => "analyzing",
            Self::Results(_) => "results",
        }
    }

    /// Returns true while a session is in flight.
    #[must_use]
    pub const fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing(_))
    }
}

/// Progress shown while a session runs.
#[derive(Debug, Clone)]
pub struct AnalyzingState {
    /// Whole percent, 0-100.
    pub percent: u8,
    pub status: &'static str,
    /// When the plot was submitted.
    pub started: Instant,
    /// Generation of the session this view belongs to.
    pub generation: u64,
}

impl AnalyzingState {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            percent: 0,
            status: INITIAL_STATUS,
            started: Instant::now(),
            generation,
        }
    }

    /// Whole seconds since submission.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// A finished analysis and the scroll position within it.
#[derive(Debug, Clone)]
pub struct ResultsState {
    pub result: AnalysisResult,
    pub scroll: ScrollState,
}

impl ResultsState {
    #[must_use]
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            scroll: ScrollState::default(),
        }
    }
}

/// Kind of a [`Notice`], which picks its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// A message shown above the editor until the next submission or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// State of the plot editor.
///
/// Wraps a `tui-textarea` editor and keeps its content within
/// [`MAX_PLOT_CHARS`] characters, counting line breaks.
pub struct TextInputState {
    /// The text area widget from `tui-textarea`.
    pub textarea: TextArea<'static>,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInputState {
    /// Creates an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            textarea: new_textarea(vec![String::new()]),
        }
    }

    /// Clears the editor.
    pub fn clear(&mut self) {
        self.textarea = new_textarea(vec![String::new()]);
    }

    /// Replaces the editor content, cut to the length limit, and moves the
    /// cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        let text = crate::core::plot::clamp_to_max(text);
        self.textarea = new_textarea(text.split('\n').map(String::from).collect());
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
    }

    /// Returns the lines of text from the textarea.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.textarea.lines()
    }

    /// Collects all input lines into a single string.
    #[must_use]
    pub fn collect_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Characters in the editor, line breaks included.
    #[must_use]
    pub fn char_count(&self) -> usize {
        let lines = self.textarea.lines();
        lines.iter().map(|l| l.chars().count()).sum::<usize>() + lines.len().saturating_sub(1)
    }

    /// Characters that can still be inserted.
    #[must_use]
    pub fn remaining(&self) -> usize {
        MAX_PLOT_CHARS.saturating_sub(self.char_count())
    }

    /// Inserts as much of `text` as fits and returns the number of
    /// characters dropped.
    pub fn insert_clamped(&mut self, text: &str) -> usize {
        let total = text.chars().count();
        let room = self.remaining();
        if total <= room {
            self.textarea.insert_str(text);
            return 0;
        }
        let fitting: String = text.chars().take(room).collect();
        self.textarea.insert_str(&fitting);
        total - room
    }

    /// Inserts a line break unless the editor is full.
    pub fn insert_newline(&mut self) {
        if self.remaining() > 0 {
            self.textarea.insert_newline();
        }
    }

    /// Inserts spaces up to the next tab stop, or as many as fit.
    pub fn insert_tab(&mut self) {
        let (_, col) = self.textarea.cursor();
        let to_stop = TAB_WIDTH - col % TAB_WIDTH;
        let spaces = to_stop.min(self.remaining());
        if spaces > 0 {
            self.textarea.insert_str(" ".repeat(spaces));
        }
    }

    /// Forwards a key to the editor.
    ///
    /// Keys that would push the content past [`MAX_PLOT_CHARS`] (yanking
    /// cut text into a full editor, for one) are undone. Returns false when
    /// the key was refused.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let before = self.textarea.clone();
        self.textarea.input(key);
        if self.char_count() > MAX_PLOT_CHARS {
            self.textarea = before;
            return false;
        }
        true
    }
}

fn new_textarea(lines: Vec<String>) -> TextArea<'static> {
    let mut textarea = TextArea::new(lines);
    textarea.set_placeholder_text(PLOT_PLACEHOLDER);
    textarea
}

/// Scroll state for a scrollable panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Current scroll offset, in rows from the top.
    pub offset: usize,
}

impl ScrollState {
    /// Scrolls up by one row.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scrolls down by one row, stopping at the last page.
    pub fn scroll_down(&mut self, content_len: usize, visible_height: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + 1).min(max_scroll);
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Scrolls down by a page, stopping at the last page.
    pub fn page_down(&mut self, content_len: usize, visible_height: usize, page_size: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + page_size).min(max_scroll);
    }

    /// Scrolls to the top.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Scrolls to the last page.
    pub fn scroll_to_bottom(&mut self, content_len: usize, visible_height: usize) {
        self.offset = content_len.saturating_sub(visible_height);
    }

    /// Pulls the offset back inside the content, e.g. after a resize.
    pub fn clamp(&mut self, content_len: usize, visible_height: usize) {
        self.offset = self.offset.min(content_len.saturating_sub(visible_height));
    }
}

/// Layout dimensions cached once per frame.
///
/// Scroll handling between frames reads these so it agrees with what was
/// last drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    pub app: AppLayout,
}

impl LayoutState {
    /// Rows of the results list that fit on screen.
    #[must_use]
    pub const fn results_visible_height(&self) -> usize {
        self.app.results_visible_height
    }

    /// Columns available to results text.
    #[must_use]
    pub const fn results_content_width(&self) -> usize {
        self.app.results_content_width
    }
}
