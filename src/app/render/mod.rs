//! Rendering methods for the App.
//!
//! The backdrop is drawn first over the whole screen, then the header, the
//! panels of the current view and the footer on top of it:
//! - **Input**: notice, plot editor and character counter
//! - **Analyzing**: progress panel
//! - **Results**: scrollable plot analysis and film list

mod analyzing;
mod input;
mod results;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::{App, ViewState};

impl App {
    /// Renders the application UI.
    pub fn render(&self, frame: &mut Frame) {
        if let Some(decoration) = &self.backdrop {
            decoration.render(frame.area(), frame.buffer_mut());
        }

        let layout = self.layout.app;
        self.render_header(frame, layout.header);

        match &self.view {
            ViewState::Input => self.render_input(frame),
            ViewState::Analyzing(state) => self.render_analyzing(frame, state),
            ViewState::Results(results) => self.render_results(frame, results),
        }

        self.render_footer(frame, layout.footer);
    }

    /// Renders the title and tagline.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("CinePlot Analyzer", self.theme.header_style())),
            Line::from(Span::styled(
                "Films with plots like yours from all of world cinema",
                self.theme.muted_style(),
            )),
        ];
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    /// Renders the key hints for the current view (single line).
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.view {
            ViewState::Input => &[
                ("[Ctrl+Enter/Ctrl+D] ", "Analyze  "),
                ("[Enter] ", "Newline  "),
                ("[Ctrl+C] ", "Quit"),
            ],
            ViewState::Analyzing(_) => &[("[Esc] ", "Cancel  "), ("[Ctrl+C] ", "Quit")],
            ViewState::Results(_) => &[
                ("[↑/↓/PgUp/PgDn] ", "Scroll  "),
                ("[Enter] ", "Analyze another plot  "),
                ("[q] ", "Quit"),
            ],
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, action) in hints {
            spans.push(Span::styled(*key, self.theme.highlight_style()));
            spans.push(Span::styled(*action, self.theme.muted_style()));
        }

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
