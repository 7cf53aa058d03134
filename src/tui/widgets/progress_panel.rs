//! Progress panel for the analyzing view.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{LineGauge, Paragraph, Widget},
};

use crate::core::progress::{COVERAGE_REGIONS, RegionState, region_state};
use crate::tui::Theme;

/// Rows the panel needs to show everything.
#[allow(clippy::cast_possible_truncation)] // six regions
pub const PROGRESS_PANEL_HEIGHT: u16 = 5 + COVERAGE_REGIONS.len() as u16;

/// Spinner frames, advanced once per second of elapsed time.
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Status line, progress gauge, elapsed time and the regional checklist.
pub struct ProgressPanel<'a> {
    /// Whole percent, 0-100.
    percent: u8,
    status: &'a str,
    elapsed_secs: u64,
    theme: &'a Theme,
}

impl<'a> ProgressPanel<'a> {
    #[must_use]
    pub const fn new(percent: u8, status: &'a str, elapsed_secs: u64, theme: &'a Theme) -> Self {
        Self {
            percent,
            status,
            elapsed_secs,
            theme,
        }
    }

    fn spinner(&self) -> &'static str {
        if self.percent >= 100 {
            return "✓";
        }
        #[allow(clippy::cast_possible_truncation)] // reduced modulo 4
        let frame = (self.elapsed_secs % SPINNER.len() as u64) as usize;
        SPINNER[frame]
    }

    fn status_line(&self) -> Line<'static> {
        let icon_style = if self.percent >= 100 {
            self.theme.success_style()
        } else {
            self.theme.highlight_style()
        };
        Line::from(vec![
            Span::styled(format!(" {} ", self.spinner()), icon_style),
            Span::styled(self.status.to_string(), self.theme.normal_style()),
        ])
    }

    fn elapsed_line(&self) -> Line<'static> {
        Line::from(Span::styled(
            format!("   {}s elapsed", self.elapsed_secs),
            self.theme.muted_style(),
        ))
    }

    fn checklist(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            " Analysis includes:",
            self.theme.label_style(),
        ))];
        for (i, region) in COVERAGE_REGIONS.iter().enumerate() {
            let (mark, style): (&str, Style) = match region_state(i, self.percent) {
                RegionState::Done => ("✓", self.theme.success_style()),
                RegionState::Active => ("▶", self.theme.highlight_style()),
                RegionState::Pending => ("·", self.theme.muted_style()),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("   {mark} "), style),
                Span::styled(*region, style),
            ]));
        }
        lines
    }
}

impl Widget for ProgressPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [status, gauge, elapsed, _, checklist] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(self.status_line()).render(status, buf);

        LineGauge::default()
            .ratio(f64::from(self.percent.min(100)) / 100.0)
            .label(format!(" {:>3}% ", self.percent))
            .filled_style(self.theme.gauge_filled_style())
            .unfilled_style(self.theme.gauge_empty_style())
            .render(gauge, buf);

        Paragraph::new(self.elapsed_line()).render(elapsed, buf);
        Paragraph::new(self.checklist()).render(checklist, buf);
    }
}
