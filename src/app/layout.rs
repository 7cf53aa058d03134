//! Layout calculation helpers for the TUI.
//!
//! Single source of truth for where each panel goes, so the dimensions used
//! for scrolling in `App::update_layout` and the areas drawn in `App::render`
//! always agree.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::tui::widgets::PROGRESS_PANEL_HEIGHT;

/// Widest the content column grows on large terminals.
pub const CONTENT_MAX_WIDTH: u16 = 100;

/// Screen areas for every view.
///
/// The header and footer span the full width. Everything else sits in a
/// centered column over the backdrop.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppLayout {
    /// Title and tagline (2 lines).
    pub header: Rect,
    /// Centered content column.
    pub body: Rect,
    /// Key hints (1 line).
    pub footer: Rect,
    /// Input view: notice line above the editor.
    pub notice: Rect,
    /// Input view: the bordered plot editor.
    pub editor: Rect,
    /// Input view: character counter under the editor.
    pub counter: Rect,
    /// Analyzing view: bordered progress panel, vertically centered.
    pub progress: Rect,
    /// Results view: bordered, scrollable list.
    pub results: Rect,
    /// Visible rows of the results list (excluding borders).
    pub results_visible_height: usize,
    /// Text width of the results list (excluding borders and scrollbar).
    pub results_content_width: usize,
}

const SCREEN_CONSTRAINTS: [Constraint; 4] = [
    Constraint::Length(2), // Header
    Constraint::Length(1), // Spacer
    Constraint::Min(5),    // Body (grows)
    Constraint::Length(1), // Footer (key hints)
];

const INPUT_CONSTRAINTS: [Constraint; 3] = [
    Constraint::Length(1), // Notice
    Constraint::Min(5),    // Editor (grows)
    Constraint::Length(1), // Counter
];

/// Calculates the layout for a terminal of size `area`.
#[must_use]
pub fn calculate_layout(area: Rect) -> AppLayout {
    let [header, _, body, footer] = Layout::vertical(SCREEN_CONSTRAINTS).areas(area);

    let column_width = body.width.saturating_sub(4).min(CONTENT_MAX_WIDTH);
    let [body] = Layout::horizontal([Constraint::Length(column_width)])
        .flex(Flex::Center)
        .areas(body);

    let [notice, editor, counter] = Layout::vertical(INPUT_CONSTRAINTS).areas(body);

    let [progress] = Layout::vertical([Constraint::Length(PROGRESS_PANEL_HEIGHT + 2)])
        .flex(Flex::Center)
        .areas(body);

    let results = body;
    // Borders top and bottom; borders left and right plus the scrollbar.
    let results_visible_height = usize::from(results.height.saturating_sub(2));
    let results_content_width = usize::from(results.width.saturating_sub(3));

    AppLayout {
        header,
        body,
        footer,
        notice,
        editor,
        counter,
        progress,
        results,
        results_visible_height,
        results_content_width,
    }
}
