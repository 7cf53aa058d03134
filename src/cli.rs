//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::AnalyzerConfig;
use crate::core::config::{
    API_KEY_ENV, DEFAULT_API_BASE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

/// Default log file name, created in the system temp dir.
pub const DEFAULT_LOG_FILE: &str = "cineplot.log";

/// `CinePlot` - find films with plots like yours
///
/// Sends a plot description to the Anthropic Messages API and lists similar
/// films from world cinema, ranked by similarity. The API key is read from
/// the `ANTHROPIC_API_KEY` environment variable.
#[derive(Parser, Debug)]
#[command(name = "cineplot", version, about, long_about = None)]
pub struct Args {
    /// Text file to pre-fill the plot editor with
    pub plot_file: Option<PathBuf>,

    /// Model identifier sent with each request
    #[arg(long, env = "CINEPLOT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upper bound on response tokens
    #[arg(long, env = "CINEPLOT_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Seconds to wait for the analysis before giving up
    #[arg(long, env = "CINEPLOT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Base URL of the Messages API
    #[arg(long, env = "CINEPLOT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Log file path (defaults to cineplot.log in the temp dir)
    #[arg(long, env = "CINEPLOT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable the animated background
    #[arg(long)]
    pub no_backdrop: bool,
}

impl Args {
    /// Builds the analyzer settings, taking the API key from the
    /// environment.
    #[must_use]
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        self.analyzer_config_with_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Builds the analyzer settings with an explicit API key.
    #[must_use]
    pub fn analyzer_config_with_key(&self, api_key: Option<String>) -> AnalyzerConfig {
        AnalyzerConfig {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
            ..AnalyzerConfig::default()
        }
    }

    /// Where logs are written.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_analyzer_defaults() {
        let args = Args::parse_from(["cineplot"]);
        let config = args.analyzer_config_with_key(None);
        assert_eq!(config, AnalyzerConfig::default());
        assert!(args.plot_file.is_none());
        assert!(!args.no_backdrop);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "cineplot",
            "plot.txt",
            "--model",
            "claude-test",
            "--max-tokens",
            "1200",
            "--timeout-secs",
            "5",
            "--api-base",
            "http://localhost:8080/",
            "--no-backdrop",
        ]);
        let config = args.analyzer_config_with_key(Some("sk-test".to_string()));
        assert_eq!(args.plot_file, Some(PathBuf::from("plot.txt")));
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.max_tokens, 1200);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.messages_url(), "http://localhost:8080/v1/messages");
        assert!(config.has_api_key());
        assert!(args.no_backdrop);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let args = Args::parse_from(["cineplot"]);
        let config = args.analyzer_config_with_key(Some("  ".to_string()));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn log_file_defaults_to_temp_dir() {
        let args = Args::parse_from(["cineplot"]);
        assert_eq!(
            args.log_file_path(),
            std::env::temp_dir().join(DEFAULT_LOG_FILE)
        );
        let args = Args::parse_from(["cineplot", "--log-file", "/tmp/x.log"]);
        assert_eq!(args.log_file_path(), PathBuf::from("/tmp/x.log"));
    }
}
