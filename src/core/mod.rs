//! Core analysis logic: plot validation, the service call, response
//! extraction and the timed session that ties them together.

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod plot;
pub mod progress;
pub mod prompts;
pub mod session;

pub use client::{AnalysisRequest, AnthropicClient, InferenceClient, RawResponse};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, ErrorCategory};
pub use extract::analysis_from_response;
pub use model::{AnalysisResult, PlotAnalysisSummary, SimilarFilm, SimilarityTier};
pub use plot::{MAX_PLOT_CHARS, MIN_PLOT_CHARS, PlotInput};
pub use progress::{ProgressSimulator, ProgressUpdate, progress_to_status};
pub use prompts::wrap_for_analysis;
pub use session::{ActiveTimers, SessionEvent, SessionParams, TimerGuard, run_session};
