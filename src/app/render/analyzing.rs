//! Analyzing view rendering.

use ratatui::{
    Frame,
    widgets::{Block, Clear},
};

use crate::app::{AnalyzingState, App};
use crate::tui::widgets::ProgressPanel;

impl App {
    /// Renders the progress panel centered in the body.
    pub(crate) fn render_analyzing(&self, frame: &mut Frame, state: &AnalyzingState) {
        let area = self.layout.app.progress;

        let block = Block::bordered()
            .title(" Analyzing Your Plot ")
            .title_style(self.theme.header_style())
            .border_style(self.theme.border_style());
        let inner = block.inner(area);

        frame.render_widget(Clear, area);
        frame.render_widget(block, area);
        frame.render_widget(
            ProgressPanel::new(state.percent, state.status, state.elapsed_secs(), &self.theme),
            inner,
        );
    }
}
