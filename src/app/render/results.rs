//! Results view rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::{App, ResultsState, ViewState};
use crate::core::AnalysisResult;
use crate::tui::widgets::{FilmCard, summary_lines};

impl App {
    /// Lays out the analysis summary and every film card, one line per row.
    pub(crate) fn results_lines(
        &self,
        result: &AnalysisResult,
        width: usize,
    ) -> Vec<Line<'static>> {
        let mut lines = summary_lines(
            &result.plot_analysis,
            result.similar_films.len(),
            &self.theme,
            width,
        );
        for (i, film) in result.similar_films.iter().enumerate() {
            lines.extend(FilmCard::new(film, i + 1, &self.theme).lines(width));
        }
        lines
    }

    /// Rows the results list occupies at the current width, or 0 outside
    /// the results view.
    pub(crate) fn results_line_count(&self) -> usize {
        match &self.view {
            ViewState::Results(results) => self
                .results_lines(&results.result, self.layout.results_content_width())
                .len(),
            _ => 0,
        }
    }

    /// Renders the scrollable results panel.
    pub(crate) fn render_results(&self, frame: &mut Frame, results: &ResultsState) {
        let area = self.layout.app.results;
        let width = self.layout.results_content_width();
        let lines = self.results_lines(&results.result, width);
        let total = lines.len();

        let block = Block::bordered()
            .title(" Analysis Complete! ")
            .title_style(self.theme.header_style())
            .border_style(self.theme.border_style());
        let inner = block.inner(area);

        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        #[allow(clippy::cast_possible_truncation)] // Clamped to the content length each frame
        let offset = results.scroll.offset.min(usize::from(u16::MAX)) as u16;
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), text_area);

        let visible = self.layout.results_visible_height();
        if total > visible {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .track_style(self.theme.muted_style())
                .thumb_style(self.theme.highlight_style());
            let mut state = ScrollbarState::new(total)
                .position(results.scroll.offset)
                .viewport_content_length(visible);
            frame.render_stateful_widget(scrollbar, inner, &mut state);
        }
    }
}
