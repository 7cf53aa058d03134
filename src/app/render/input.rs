//! Input view rendering.

use ratatui::{
    Frame,
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::app::{App, NoticeKind};
use crate::core::plot::{MAX_PLOT_CHARS, MIN_PLOT_CHARS, trimmed_len};

impl App {
    /// Renders the notice, the plot editor and the counter.
    pub(crate) fn render_input(&self, frame: &mut Frame) {
        let layout = self.layout.app;

        if let Some(notice) = &self.notice {
            let style = match notice.kind {
                NoticeKind::Warning => self.theme.warning_style(),
                NoticeKind::Error => self.theme.error_style(),
            };
            frame.render_widget(Clear, layout.notice);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(notice.text.as_str(), style))),
                layout.notice,
            );
        }

        let block = Block::bordered()
            .title(" Enter Your Plot, Story Idea, or Concept ")
            .title_style(self.theme.header_style())
            .border_style(self.theme.border_style());

        let mut textarea = self.text_input.textarea.clone();
        textarea.set_block(block);
        textarea.set_style(self.theme.normal_style());
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_style(self.theme.placeholder_style());

        frame.render_widget(Clear, layout.editor);
        frame.render_widget(&textarea, layout.editor);

        frame.render_widget(Clear, layout.counter);
        frame.render_widget(
            Paragraph::new(self.counter_line()).alignment(Alignment::Right),
            layout.counter,
        );
    }

    /// Readiness hint and `N/2000` character count.
    fn counter_line(&self) -> Line<'static> {
        let text = self.text_input.collect_text();
        let trimmed = trimmed_len(&text);
        let readiness = if trimmed >= MIN_PLOT_CHARS {
            Span::styled("Ready to analyze  ", self.theme.success_style())
        } else {
            Span::styled(
                format!("{} more characters needed  ", MIN_PLOT_CHARS - trimmed),
                self.theme.muted_style(),
            )
        };
        Line::from(vec![
            readiness,
            Span::styled(
                format!("{}/{MAX_PLOT_CHARS}", self.text_input.char_count()),
                self.theme.muted_style(),
            ),
        ])
    }
}
