//! One ranked film in the results list.

use ratatui::text::{Line, Span};

use crate::core::SimilarFilm;
use crate::tui::Theme;
use crate::tui::widgets::text::wrap_text;

/// Cells in the score bar.
const SCORE_BAR_CELLS: usize = 10;

/// Left indent of the card body, aligned under the title.
const INDENT: &str = "     ";

/// Renders a film as pre-wrapped lines.
///
/// Cards are laid out as plain lines rather than a boxed widget so the
/// results list can scroll through them row by row.
pub struct FilmCard<'a> {
    film: &'a SimilarFilm,
    /// 1-based position in the ranking.
    rank: usize,
    theme: &'a Theme,
}

impl<'a> FilmCard<'a> {
    #[must_use]
    pub const fn new(film: &'a SimilarFilm, rank: usize, theme: &'a Theme) -> Self {
        Self { film, rank, theme }
    }

    /// Lays the card out for `width` columns, ending with a blank spacer line.
    #[must_use]
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let film = self.film;
        let theme = self.theme;
        let body_width = width.saturating_sub(INDENT.len()).max(1);
        let mut lines = Vec::new();

        lines.push(Line::from(vec![
            Span::styled(format!("#{:<3} ", self.rank), theme.muted_style()),
            Span::styled(film.title.clone(), theme.title_style()),
            Span::styled(format!(" ({})", film.year), theme.muted_style()),
        ]));

        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(score_bar(film.similarity_score), theme.tier_style(film.tier())),
            Span::styled(
                format!(" {}% match", film.similarity_score),
                theme.tier_style(film.tier()),
            ),
        ]));

        if let Some(title) = film
            .international_title
            .as_deref()
            .filter(|t| !t.is_empty() && *t != film.title)
        {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(format!("aka \"{title}\""), theme.muted_style()),
            ]));
        }

        for row in wrap_text(&self.credits(), body_width) {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(row, theme.normal_style()),
            ]));
        }

        if !film.matching_elements.is_empty() {
            push_labelled(
                &mut lines,
                "Matching: ",
                &film.matching_elements.join(" · "),
                body_width,
                theme,
            );
        }
        push_labelled(&mut lines, "Plot: ", &film.plot_summary, body_width, theme);
        push_labelled(&mut lines, "Why: ", &film.why_similar, body_width, theme);

        lines.push(Line::default());
        lines
    }

    /// Director, country, language, genre and rating on one line.
    fn credits(&self) -> String {
        let film = self.film;
        let mut parts = vec![
            format!("Dir. {}", film.director),
            film.country.clone(),
            film.language.clone(),
            film.genre.clone(),
        ];
        if let Some(rating) = film.rating.as_deref().filter(|r| !r.is_empty()) {
            parts.push(format!("★ {rating}"));
        }
        parts.retain(|p| !p.trim().is_empty());
        parts.join(" · ")
    }
}

/// Appends `label` followed by `text`, wrapped under the card indent.
fn push_labelled(
    lines: &mut Vec<Line<'static>>,
    label: &'static str,
    text: &str,
    width: usize,
    theme: &Theme,
) {
    let first_width = width.saturating_sub(label.len()).max(1);
    let mut rows = wrap_text(text, first_width).into_iter();
    let first = rows.next().unwrap_or_default();
    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(label, theme.label_style()),
        Span::styled(first, theme.normal_style()),
    ]));
    // Continuation rows are re-wrapped to the full body width.
    let rest = rows.collect::<Vec<_>>().join(" ");
    if !rest.is_empty() {
        for row in wrap_text(&rest, width) {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(row, theme.normal_style()),
            ]));
        }
    }
}

/// A ten-cell bar proportional to `score`.
#[must_use]
pub fn score_bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * SCORE_BAR_CELLS + 50) / 100;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(SCORE_BAR_CELLS - filled));
    bar
}
