//! Plot analysis summary shown above the film list.

use ratatui::text::{Line, Span};

use crate::core::PlotAnalysisSummary;
use crate::tui::Theme;
use crate::tui::widgets::text::wrap_text;

/// Lays out the plot analysis as pre-wrapped lines, ending with a blank line.
#[must_use]
pub fn summary_lines(
    summary: &PlotAnalysisSummary,
    film_count: usize,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Plot Analysis", theme.header_style()),
        Span::styled(
            format!("  ·  {film_count} similar films found"),
            theme.muted_style(),
        ),
    ])];

    lines.push(Line::from(vec![
        Span::styled("Genre: ", theme.label_style()),
        Span::styled(summary.genre.clone(), theme.normal_style()),
        Span::styled("   Mood: ", theme.label_style()),
        Span::styled(summary.mood.clone(), theme.normal_style()),
    ]));

    for (label, value) in [
        ("Conflict: ", summary.conflict_type.clone()),
        ("Themes: ", summary.main_themes.join(" · ")),
        ("Archetypes: ", summary.character_archetypes.join(" · ")),
        ("Structure: ", summary.plot_structure.clone()),
    ] {
        if value.trim().is_empty() {
            continue;
        }
        let mut rows = wrap_text(&value, width.saturating_sub(label.len()).max(1)).into_iter();
        lines.push(Line::from(vec![
            Span::styled(label, theme.label_style()),
            Span::styled(rows.next().unwrap_or_default(), theme.normal_style()),
        ]));
        let pad = " ".repeat(label.len());
        for row in rows {
            lines.push(Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(row, theme.normal_style()),
            ]));
        }
    }

    lines.push(Line::default());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::fixtures::summary;

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn lists_every_field() {
        let theme = Theme::default();
        let text = text_of(&summary_lines(&summary(), 3, &theme, 80)).join("\n");
        assert!(text.contains("3 similar films found"));
        assert!(text.contains("Themes: revenge · identity"));
        assert!(text.contains("Archetypes: avenger · mastermind"));
        assert!(text.contains("Structure: Linear with a late reveal"));
        assert!(text.contains("Genre: Thriller"));
    }

    #[test]
    fn continuation_rows_are_indented() {
        let theme = Theme::default();
        let mut s = summary();
        s.plot_structure = "act ".repeat(30);
        let text = text_of(&summary_lines(&s, 1, &theme, 30));
        let start = text.iter().position(|l| l.starts_with("Structure: ")).unwrap();
        assert!(text[start + 1].starts_with("           act"));
        assert!(
            text[start..]
                .iter()
                .take_while(|l| !l.is_empty())
                .all(|l| l.chars().count() <= 30)
        );
    }

    #[test]
    fn empty_fields_are_skipped() {
        let theme = Theme::default();
        let mut s = summary();
        s.character_archetypes.clear();
        let text = text_of(&summary_lines(&s, 1, &theme, 80));
        assert!(!text.iter().any(|l| l.starts_with("Archetypes")));
    }
}
