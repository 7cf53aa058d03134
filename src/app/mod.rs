//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `events` - Key and paste handling
//! - `layout` - Panel geometry
//! - `render` - UI rendering
//! - `state` - Application state structures
//!
//! ## Views
//!
//! The application shows one of three views at a time:
//!
//! - **Input**: the plot editor. Submitting a long enough plot starts a
//!   session.
//! - **Analyzing**: simulated progress while the service works. Esc cancels.
//! - **Results**: the plot analysis and ranked films. Enter starts over.
//!
//! Failures, timeouts and cancellation all land back on the input view with
//! the plot text intact.

pub mod events;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{AppLayout, CONTENT_MAX_WIDTH, calculate_layout};

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::core::{
    ActiveTimers, AnalyzerConfig, AnthropicClient, InferenceClient, MAX_PLOT_CHARS, PlotInput,
    SessionEvent, SessionParams, run_session,
};
use crate::tui::Theme;
use crate::tui::widgets::{Backdrop, Decoration};

pub use self::state::{
    AnalyzingState, LayoutState, Notice, NoticeKind, ResultsState, ScrollState, TextInputState,
    ViewState,
};

/// Channel buffer size for session events.
const EVENT_CHANNEL_SIZE: usize = 64;

/// Main application state.
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current view, with the data that belongs to it.
    pub(crate) view: ViewState,
    /// Message shown above the editor.
    pub(crate) notice: Option<Notice>,
    /// Should quit flag.
    should_quit: bool,

    // =========================================================================
    // Analysis
    // =========================================================================
    client: Arc<dyn InferenceClient>,
    config: AnalyzerConfig,
    /// Event receiver for session events.
    event_rx: mpsc::Receiver<SessionEvent>,
    /// Event sender, cloned into each session.
    event_tx: mpsc::Sender<SessionEvent>,
    /// Cancel signal of the running session.
    cancel_tx: Option<watch::Sender<bool>>,
    /// Task of the running session.
    session: Option<JoinHandle<()>>,
    /// Generation of the newest session. Events from older ones are dropped.
    generation: u64,
    /// Timers owned by sessions, for leak checks.
    timers: ActiveTimers,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Plot editor.
    pub(crate) text_input: TextInputState,
    /// Dynamic layout dimensions.
    pub(crate) layout: LayoutState,
    /// Animated background, absent when disabled.
    backdrop: Option<Box<dyn Decoration>>,
    /// Area the backdrop was last sized for.
    screen: Rect,
    /// When the backdrop last advanced.
    last_tick: Instant,
}

impl App {
    /// Creates the application with the HTTP client for `config`.
    ///
    /// When `backdrop` is true the animated background is created and
    /// started.
    #[must_use]
    pub fn new(config: AnalyzerConfig, backdrop: bool) -> Self {
        let client: Arc<dyn InferenceClient> = Arc::new(AnthropicClient::new(&config));
        let theme = Theme::default();
        let decoration: Option<Box<dyn Decoration>> = backdrop.then(|| {
            let mut rng = StdRng::from_entropy();
            Box::new(Backdrop::new(&mut rng, &theme)) as Box<dyn Decoration>
        });

        let mut app = Self::with_client(client, config, decoration);
        if !app.config.has_api_key() {
            warn!(
                env = crate::core::config::API_KEY_ENV,
                "no API key configured"
            );
            app.notice = Some(Notice::warning(format!(
                "{} is not set. Requests will be rejected by the service.",
                crate::core::config::API_KEY_ENV
            )));
        }
        app
    }

    /// Creates the application around an existing client.
    ///
    /// This constructor is what tests use, with a mock client and usually
    /// no backdrop.
    #[must_use]
    pub fn with_client(
        client: Arc<dyn InferenceClient>,
        config: AnalyzerConfig,
        mut backdrop: Option<Box<dyn Decoration>>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        if let Some(decoration) = backdrop.as_mut() {
            decoration.start();
        }
        info!(client = client.name(), config = ?config, "application created");

        Self {
            theme: Theme::default(),
            view: ViewState::default(),
            notice: None,
            should_quit: false,
            client,
            config,
            event_rx,
            event_tx,
            cancel_tx: None,
            session: None,
            generation: 0,
            timers: ActiveTimers::new(),
            text_input: TextInputState::new(),
            layout: LayoutState::default(),
            backdrop,
            screen: Rect::default(),
            last_tick: Instant::now(),
        }
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current view.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns the message shown above the editor, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns the current editor text.
    #[must_use]
    pub fn plot_text(&self) -> String {
        self.text_input.collect_text()
    }

    /// Counter of session timers still running.
    #[must_use]
    pub fn active_timers(&self) -> ActiveTimers {
        self.timers.clone()
    }

    /// Returns true while a session task is attached to the app.
    #[must_use]
    pub fn has_live_session(&self) -> bool {
        self.session.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Fills the editor from a file.
    ///
    /// Content beyond [`MAX_PLOT_CHARS`] characters is dropped and a warning
    /// notice says so.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load_plot_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plot file {}", path.display()))?;
        let text = text.replace("\r\n", "\n");
        let chars = text.chars().count();

        self.text_input.set_text(&text);
        info!(path = %path.display(), chars, "plot file loaded");

        if chars > MAX_PLOT_CHARS {
            warn!(chars, max = MAX_PLOT_CHARS, "plot file truncated");
            self.notice = Some(Notice::warning(format!(
                "Plot file has {chars} characters; only the first {MAX_PLOT_CHARS} were loaded."
            )));
        }
        Ok(())
    }

    /// Validates the editor text and starts a session.
    ///
    /// A plot that is too short sets a notice and never reaches the
    /// service. Only allowed from the input view.
    pub(crate) fn submit(&mut self) {
        if !matches!(self.view, ViewState::Input) {
            return;
        }
        if self.has_live_session() {
            warn!("submission ignored, a session is still running");
            return;
        }

        let text = self.text_input.collect_text();
        let plot = match PlotInput::parse(&text) {
            Ok(plot) => plot,
            Err(e) => {
                debug!(error = %e, "submission rejected");
                self.notice = e.user_message().map(Notice::warning);
                return;
            }
        };

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let params = SessionParams {
            client: Arc::clone(&self.client),
            plot,
            config: self.config.clone(),
            generation,
            timers: self.timers.clone(),
        };

        self.session = Some(tokio::spawn(run_session(
            params,
            self.event_tx.clone(),
            cancel_rx,
        )));
        self.cancel_tx = Some(cancel_tx);
        self.notice = None;
        self.view = ViewState::Analyzing(AnalyzingState::new(generation));
    }

    /// Cancels the running analysis and returns to the editor.
    pub(crate) fn cancel_analysis(&mut self) {
        let ViewState::Analyzing(state) = &self.view else {
            return;
        };
        info!(generation = state.generation, "analysis cancelled by user");
        self.stop_session();
        self.view = ViewState::Input;
    }

    /// Leaves the results view with an empty editor.
    pub(crate) fn reset(&mut self) {
        if !matches!(self.view, ViewState::Results(_)) {
            return;
        }
        self.view = ViewState::Input;
        self.text_input.clear();
        self.notice = None;
    }

    /// Signals the session to stop and detaches from it.
    ///
    /// Bumping the generation makes any event it already queued stale.
    fn stop_session(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            // Works even after the session dropped its receiver.
            cancel_tx.send_modify(|v| *v = true);
        }
        self.session = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stops the session and the backdrop before exit.
    pub fn shutdown(&mut self) {
        self.stop_session();
        if let Some(decoration) = self.backdrop.as_mut() {
            decoration.stop();
        }
    }

    /// Applies every session event waiting in the channel.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_session_event(event);
        }
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        let ViewState::Analyzing(state) = &mut self.view else {
            debug!(generation = event.generation(), "event outside analyzing view dropped");
            return;
        };
        if event.generation() != state.generation {
            debug!(
                generation = event.generation(),
                current = state.generation,
                "stale session event dropped"
            );
            return;
        }

        match event {
            SessionEvent::Progress { update, .. } => {
                if update.percent >= state.percent {
                    state.percent = update.percent;
                    state.status = update.status;
                }
            }
            SessionEvent::Finished { outcome, .. } => {
                self.cancel_tx = None;
                self.session = None;
                match outcome {
                    Ok(result) => {
                        info!(films = result.similar_films.len(), "showing results");
                        self.view = ViewState::Results(ResultsState::new(result));
                    }
                    Err(e) => {
                        error!(category = ?e.category(), error = %e, "analysis failed");
                        self.notice = e.user_message().map(Notice::error);
                        self.view = ViewState::Input;
                    }
                }
            }
        }
    }

    /// Advances the backdrop by the time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        if let Some(decoration) = self.backdrop.as_mut() {
            decoration.tick(dt);
        }
    }

    /// Calculates and caches the layout based on terminal dimensions.
    ///
    /// Should be called once per frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout.app = calculate_layout(terminal_area);

        if terminal_area != self.screen {
            self.screen = terminal_area;
            if let Some(decoration) = self.backdrop.as_mut() {
                decoration.on_resize(terminal_area);
            }
        }

        let visible = self.layout.results_visible_height();
        let content_len = self.results_line_count();
        if let ViewState::Results(results) = &mut self.view {
            results.scroll.clamp(content_len, visible);
        }
    }
}
