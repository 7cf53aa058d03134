//! Plot text bounds and submission validation.

use crate::core::error::AnalysisError;

/// Minimum trimmed length, in characters, for a plot to be submitted.
pub const MIN_PLOT_CHARS: usize = 50;

/// Maximum plot length in characters. Longer input is cut off.
pub const MAX_PLOT_CHARS: usize = 2000;

/// A plot that passed validation and may be sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotInput(String);

impl PlotInput {
    /// Validates raw editor text for submission.
    ///
    /// The text is kept verbatim (not trimmed); only the length check uses
    /// the trimmed form.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InputTooShort`] when the trimmed text has
    /// fewer than [`MIN_PLOT_CHARS`] characters.
    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        let chars = trimmed_len(text);
        if chars < MIN_PLOT_CHARS {
            return Err(AnalysisError::InputTooShort { chars });
        }
        Ok(Self(clamp_to_max(text).to_string()))
    }

    /// Returns the plot text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the plot in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Number of characters in `text` once surrounding whitespace is removed.
#[must_use]
pub fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Returns true if `text` is long enough to submit.
#[must_use]
pub fn is_submittable(text: &str) -> bool {
    trimmed_len(text) >= MIN_PLOT_CHARS
}

/// Cuts `text` down to at most [`MAX_PLOT_CHARS`] characters.
#[must_use]
pub fn clamp_to_max(text: &str) -> &str {
    match text.char_indices().nth(MAX_PLOT_CHARS) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}
