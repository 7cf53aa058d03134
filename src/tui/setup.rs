//! Terminal event modes the editor relies on.
//!
//! - Bracketed paste, so a pasted plot arrives as one `Event::Paste`
//! - Keyboard enhancement, so Ctrl+Enter is distinguishable from Enter

use std::io::stdout;

use ratatui::crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;
use tracing::{debug, warn};

/// Enables the event modes and turns them off again on drop, including
/// during a panic unwind.
pub struct TerminalEventGuard {
    paste: bool,
    keyboard: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let paste = match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "bracketed paste unavailable, pasted lines arrive as key presses");
                false
            }
        };

        let keyboard = match execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        ) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "keyboard enhancement unavailable, Ctrl+D and Ctrl+S still submit");
                false
            }
        };

        debug!(paste, keyboard, "terminal event modes set");
        Self { paste, keyboard }
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.keyboard {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if self.paste {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
