//! Shared test utilities for the app module.
//!
//! - `MockClient` - scripted `InferenceClient` that counts its calls
//! - `create_test_app` - `App` around a mock client, without a backdrop
//! - `settle` - drives paused time until the app leaves the analyzing view
//! - `render_app_to_terminal` - renders the app to a `TestBackend`
//! - Key event helpers (`char_key`, `enter_key`, `ctrl_key`, `key`)

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use serde_json::json;

use crate::app::{App, ViewState};
use crate::core::extract::fixtures::{analysis_json, envelope, film};
use crate::core::{AnalysisError, AnalysisRequest, AnalyzerConfig, InferenceClient, RawResponse};

/// A plot comfortably over the minimum length.
pub const VALID_PLOT: &str = "A disgraced detective returns to the coastal village where his \
     sister vanished twenty years ago, only to find the townsfolk lying.";

/// Creates a [`KeyEvent`] with the given code and modifiers.
pub fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Creates a [`KeyEvent`] for the Enter key with specified modifiers.
pub fn enter_key(modifiers: KeyModifiers) -> KeyEvent {
    key(KeyCode::Enter, modifiers)
}

/// Creates a [`KeyEvent`] for `Ctrl` plus a character.
pub fn ctrl_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Scripted inference client.
///
/// Waits `delay` (on the tokio clock) before answering with a clone of
/// `response`.
pub struct MockClient {
    pub delay: Duration,
    pub response: Result<RawResponse, AnalysisError>,
    pub calls: AtomicU32,
}

impl MockClient {
    pub fn new(delay: Duration, response: Result<RawResponse, AnalysisError>) -> Arc<Self> {
        Arc::new(Self {
            delay,
            response,
            calls: AtomicU32::new(0),
        })
    }

    /// Answers with the standard analysis (films scored 72, 95, 81).
    pub fn success(delay: Duration) -> Arc<Self> {
        Self::with_body(delay, envelope(&analysis_json().to_string()))
    }

    /// Answers with an analysis holding one film per score, titled `Film N`.
    pub fn with_scores(delay: Duration, scores: &[u8]) -> Arc<Self> {
        let mut analysis = analysis_json();
        analysis["similarFilms"] = scores
            .iter()
            .enumerate()
            .map(|(i, score)| film(&format!("Film {i}"), *score, "Japan"))
            .collect();
        Self::with_body(delay, envelope(&analysis.to_string()))
    }

    /// Answers 200 with `body`.
    pub fn with_body(delay: Duration, body: String) -> Arc<Self> {
        Self::new(delay, Ok(RawResponse { status: 200, body }))
    }

    /// Answers with a model reply whose text is not JSON.
    pub fn unparsable(delay: Duration) -> Arc<Self> {
        Self::with_body(delay, envelope("{ this is not json"))
    }

    /// Answers with `status` and an error body.
    pub fn status(delay: Duration, status: u16) -> Arc<Self> {
        Self::new(
            delay,
            Ok(RawResponse {
                status,
                body: json!({"type": "error"}).to_string(),
            }),
        )
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceClient for MockClient {
    async fn send(&self, _request: &AnalysisRequest) -> Result<RawResponse, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.response.clone()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Creates an `App` around `client` with default settings and no backdrop.
pub fn create_test_app(client: Arc<MockClient>) -> App {
    App::with_client(client, AnalyzerConfig::default(), None)
}

/// Creates an `App` whose editor already holds `text`.
pub fn create_test_app_with_text(client: Arc<MockClient>, text: &str) -> App {
    let mut app = create_test_app(client);
    app.handle_paste(text);
    app
}

/// Current analyzing percent, if the app is analyzing.
pub fn analyzing_percent(app: &App) -> Option<u8> {
    match app.view() {
        ViewState::Analyzing(state) => Some(state.percent),
        _ => None,
    }
}

/// Lets the session run in steps of `step` of paused time, applying its
/// events after each step, until the app leaves the analyzing view.
///
/// Returns the analyzing percent observed after every step.
pub async fn settle(app: &mut App, step: Duration) -> Vec<u8> {
    let mut seen = Vec::new();
    for _ in 0..1000 {
        tokio::time::sleep(step).await;
        app.process_events();
        match analyzing_percent(app) {
            Some(percent) => seen.push(percent),
            None => return seen,
        }
    }
    panic!("session did not finish");
}

/// Lets spawned tasks run until none of them is ready.
pub async fn yield_a_while() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Renders the app to a `TestBackend` of the given size.
pub fn render_app_to_terminal(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })
        .unwrap();
    terminal
}

/// Every row of the rendered buffer, joined with newlines.
pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
