//! Centralized theme and styling.
//!
//! A dark "cinema" palette: gold marquee text, magenta accents and a
//! hot-to-cold ramp for similarity scores.

use ratatui::style::{Color, Modifier, Style};

use crate::core::SimilarityTier;

/// Application colours. Widgets never hardcode colours; they ask the theme
/// for a style.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Body text.
    pub text: Color,
    /// Key hints, labels and the active checklist entry.
    pub accent: Color,
    /// App title and film names.
    pub marquee: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Secondary text: years, counters, pending entries.
    pub muted: Color,
    /// Filled part of the progress gauge.
    pub gauge_filled: Color,
    /// Unfilled part of the progress gauge.
    pub gauge_empty: Color,
    pub border: Color,
    /// Film reel rings in the backdrop.
    pub reel: Color,
    /// Score colours, indexed by [`tier_index`].
    pub tiers: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            accent: Color::Magenta,
            marquee: Color::LightYellow,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            gauge_filled: Color::Magenta,
            gauge_empty: Color::DarkGray,
            border: Color::Gray,
            reel: Color::Rgb(255, 215, 0),
            tiers: [
                Color::Red,
                Color::LightRed,
                Color::Yellow,
                Color::Green,
                Color::Blue,
            ],
        }
    }
}

/// Position of `tier` in [`Theme::tiers`], hottest first.
const fn tier_index(tier: SimilarityTier) -> usize {
    match tier {
        SimilarityTier::Exceptional => 0,
        SimilarityTier::Strong => 1,
        SimilarityTier::Notable => 2,
        SimilarityTier::Moderate => 3,
        SimilarityTier::Loose => 4,
    }
}

impl Theme {
    /// Bold marquee text for the app title and panel titles.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.marquee)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Key hints and the active checklist entry.
    #[must_use]
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Field labels such as "Genre:" and "Why:".
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// A film title in the results list.
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.marquee)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Editor placeholder; `Gray` with `DIM` reads on light and dark
    /// terminals alike.
    #[must_use]
    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    }

    #[must_use]
    pub fn gauge_filled_style(&self) -> Style {
        Style::default().fg(self.gauge_filled)
    }

    #[must_use]
    pub fn gauge_empty_style(&self) -> Style {
        Style::default().fg(self.gauge_empty)
    }

    /// Colour for a similarity tier.
    #[must_use]
    pub const fn tier_color(&self, tier: SimilarityTier) -> Color {
        self.tiers[tier_index(tier)]
    }

    /// Bold style in the tier colour, for score badges.
    #[must_use]
    pub fn tier_style(&self, tier: SimilarityTier) -> Style {
        Style::default()
            .fg(self.tier_color(tier))
            .add_modifier(Modifier::BOLD)
    }
}
