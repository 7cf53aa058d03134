//! Failure taxonomy for a plot analysis.

use thiserror::Error;

use crate::core::plot::MIN_PLOT_CHARS;

/// Everything that can end an analysis without a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The plot is too short to submit. Never reaches the network.
    #[error("plot has {chars} characters, at least {min} required", min = MIN_PLOT_CHARS)]
    InputTooShort { chars: usize },
    /// The service answered with a non-success HTTP status.
    #[error("API request failed with status {status}")]
    Transport { status: u16 },
    /// The request never produced an HTTP response.
    #[error("API request failed: {0}")]
    Network(String),
    /// The response envelope is missing `content[0].text`.
    #[error("invalid response format from API: {0}")]
    ResponseShape(String),
    /// The embedded text is not valid JSON.
    #[error("embedded JSON could not be parsed: {0}")]
    Parse(String),
    /// The JSON does not match the requested result schema.
    #[error("invalid results structure: {0}")]
    Schema(String),
    /// The overall time budget was exceeded.
    #[error("analysis timed out after {secs}s")]
    Timeout { secs: u64 },
    /// The user cancelled the analysis.
    #[error("analysis cancelled")]
    Cancelled,
}

/// User-facing grouping of [`AnalysisError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InputTooShort,
    TransportFailure,
    ResponseShapeInvalid,
    ParseFailure,
    SchemaInvalid,
    Timeout,
    UserCancelled,
}

impl AnalysisError {
    /// Returns the category this error is reported under.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InputTooShort { .. } => ErrorCategory::InputTooShort,
            Self::Transport { .. } | Self::Network(_) => ErrorCategory::TransportFailure,
            Self::ResponseShape(_) => ErrorCategory::ResponseShapeInvalid,
            Self::Parse(_) => ErrorCategory::ParseFailure,
            Self::Schema(_) => ErrorCategory::SchemaInvalid,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Cancelled => ErrorCategory::UserCancelled,
        }
    }

    /// Returns the message shown to the user, or `None` when nothing should
    /// be shown (explicit cancellation).
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self.category() {
            ErrorCategory::InputTooShort => {
                Some("Please enter at least 50 characters for a meaningful analysis.")
            }
            ErrorCategory::TransportFailure => Some(
                "Analysis failed. The server might be busy. Please try again in a moment.",
            ),
            ErrorCategory::ParseFailure => Some(
                "Analysis failed. There was an issue processing the results. Please try with a different plot.",
            ),
            ErrorCategory::ResponseShapeInvalid | ErrorCategory::SchemaInvalid => {
                Some("Analysis failed. Please try again with a different plot description.")
            }
            ErrorCategory::Timeout => Some(
                "Analysis timed out. Please try with a shorter or simpler plot description.",
            ),
            ErrorCategory::UserCancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_status_errors_share_transport_category() {
        assert_eq!(
            AnalysisError::Transport { status: 503 }.category(),
            ErrorCategory::TransportFailure
        );
        assert_eq!(
            AnalysisError::Network("connection refused".into()).category(),
            ErrorCategory::TransportFailure
        );
    }

    #[test]
    fn failure_classes_have_distinct_messages() {
        let transport = AnalysisError::Transport { status: 500 }.user_message();
        let parse = AnalysisError::Parse("eof".into()).user_message();
        let schema = AnalysisError::Schema("missing".into()).user_message();
        let timeout = AnalysisError::Timeout { secs: 30 }.user_message();

        assert_ne!(transport, parse);
        assert_ne!(parse, schema);
        assert_ne!(timeout, transport);
        assert!(timeout.unwrap().contains("timed out"));
    }

    #[test]
    fn cancellation_is_silent() {
        assert_eq!(AnalysisError::Cancelled.user_message(), None);
    }

    #[test]
    fn display_includes_status_code() {
        let err = AnalysisError::Transport { status: 429 };
        assert_eq!(err.to_string(), "API request failed with status 429");
    }
}
