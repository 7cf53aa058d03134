//! Event handling logic for the App.
//!
//! Key bindings by view:
//!
//! - Any view: `Ctrl+C` quits.
//! - **Input**: `Ctrl+Enter`, `Ctrl+D` or `Ctrl+S` submits; `Enter` or
//!   `Ctrl+M` inserts a newline; `Tab` pads to the next tab stop; other keys
//!   go to the editor. Nothing grows the text past the length limit.
//! - **Analyzing**: `Esc` cancels.
//! - **Results**: `Up`/`Down`, `PageUp`/`PageDown`, `Home`/`End` scroll;
//!   `Enter` or `n` starts a new analysis; `q` quits.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::{App, ViewState};

impl App {
    /// Handles pasted text.
    ///
    /// Line endings are normalized and control characters other than
    /// newlines are removed. Text past the length limit is dropped.
    pub fn handle_paste(&mut self, text: &str) {
        if !matches!(self.view, ViewState::Input) || text.is_empty() {
            return;
        }

        // tui-textarea handles \n and \r\n but not standalone \r
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let filtered: String = normalized
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect();

        let dropped = self.text_input.insert_clamped(&filtered);
        if dropped > 0 {
            debug!(dropped, "paste truncated at length limit");
        }
    }

    /// Handles a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.shutdown();
            self.should_quit = true;
            return;
        }

        match self.view {
            ViewState::Input => self.handle_input_key(key),
            ViewState::Analyzing(_) => {
                if key.code == KeyCode::Esc {
                    self.cancel_analysis();
                }
            }
            ViewState::Results(_) => self.handle_results_key(key),
        }
    }

    /// Handles keys in the editor.
    fn handle_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter if ctrl => self.submit(),
            KeyCode::Char('d' | 's') if ctrl => self.submit(),
            KeyCode::Enter => self.text_input.insert_newline(),
            KeyCode::Char('m') if ctrl => self.text_input.insert_newline(),
            KeyCode::Tab => self.text_input.insert_tab(),
            KeyCode::Char(_) if !ctrl && self.text_input.remaining() == 0 => {}
            // Esc has nothing to cancel here
            KeyCode::Esc => {}
            _ => {
                if !self.text_input.input(key) {
                    debug!(code = ?key.code, "key refused at length limit");
                }
            }
        }
    }

    /// Handles keys in the results view.
    fn handle_results_key(&mut self, key: KeyEvent) {
        let content_len = self.results_line_count();
        let visible = self.layout.results_visible_height();
        let page = visible.saturating_sub(1).max(1);

        match key.code {
            KeyCode::Enter | KeyCode::Char('n') => {
                self.reset();
                return;
            }
            KeyCode::Char('q') => {
                self.shutdown();
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let ViewState::Results(results) = &mut self.view else {
            return;
        };
        let scroll = &mut results.scroll;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => scroll.scroll_down(content_len, visible),
            KeyCode::PageUp => scroll.page_up(page),
            KeyCode::PageDown => scroll.page_down(content_len, visible, page),
            KeyCode::Home => scroll.scroll_to_top(),
            KeyCode::End => scroll.scroll_to_bottom(content_len, visible),
            _ => {}
        }
    }
}
