//! One analysis session: the request, the progress timer and the timeout.
//!
//! A session runs as a single spawned task. The request future, the progress
//! interval and the timeout sleep are polled together in one `select!`, so
//! leaving the loop drops all of them at once. Each timer holds a
//! [`TimerGuard`] while it is alive, which lets callers observe how many
//! timers are still running.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::client::{AnalysisRequest, InferenceClient, RawResponse};
use crate::core::config::AnalyzerConfig;
use crate::core::error::AnalysisError;
use crate::core::extract::analysis_from_response;
use crate::core::model::AnalysisResult;
use crate::core::plot::PlotInput;
use crate::core::progress::{
    COMPLETE_PERCENT, COMPLETE_STATUS, PROCESSING_STATUS, ProgressSimulator, ProgressUpdate,
    RESPONSE_RECEIVED_PERCENT,
};

/// Events sent from a running session to the UI.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Progress bar moved.
    Progress {
        /// Session that produced the event.
        generation: u64,
        update: ProgressUpdate,
    },
    /// The session ended with a result or an error.
    ///
    /// Not sent when the session is cancelled.
    Finished {
        /// Session that produced the event.
        generation: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
}

impl SessionEvent {
    /// Returns the generation of the session that sent this event.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Progress { generation, .. } | Self::Finished { generation, .. } => *generation,
        }
    }
}

/// Shared count of timers that are currently running.
#[derive(Debug, Clone, Default)]
pub struct ActiveTimers(Arc<AtomicUsize>);

impl ActiveTimers {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live guards.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Registers one running timer until the returned guard is dropped.
    #[must_use]
    pub fn guard(&self) -> TimerGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        TimerGuard(Arc::clone(&self.0))
    }
}

/// Keeps one timer registered in [`ActiveTimers`].
#[derive(Debug)]
pub struct TimerGuard(Arc<AtomicUsize>);

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Everything a session needs besides its channels.
pub struct SessionParams {
    pub client: Arc<dyn InferenceClient>,
    pub plot: PlotInput,
    pub config: AnalyzerConfig,
    /// Generation stamped on every event.
    pub generation: u64,
    pub timers: ActiveTimers,
}

/// Outcome of the wait for the service response.
enum Wait {
    Response(Result<RawResponse, AnalysisError>),
    TimedOut,
    Cancelled,
}

/// Runs one analysis session to completion.
///
/// Sends [`SessionEvent::Progress`] on every interval tick and one
/// [`SessionEvent::Finished`] at the end. Returns early, without a
/// `Finished` event, when `cancel_rx` flips to `true` or its sender is
/// dropped. All timers are released before this function returns.
pub async fn run_session(
    params: SessionParams,
    tx: mpsc::Sender<SessionEvent>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let SessionParams {
        client,
        plot,
        config,
        generation,
        timers,
    } = params;

    info!(
        generation,
        client = client.name(),
        plot_chars = plot.char_count(),
        "analysis started"
    );

    let request = AnalysisRequest::new(&plot, &config);
    let mut simulator = ProgressSimulator::new();
    let mut rng = StdRng::from_entropy();

    let wait = {
        let _interval_guard = timers.guard();
        let _timeout_guard = timers.guard();

        let mut ticker = tokio::time::interval_at(
            Instant::now() + config.progress_interval,
            config.progress_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = tokio::time::sleep(config.timeout);
        tokio::pin!(deadline);
        let call = client.send(&request);
        tokio::pin!(call);

        loop {
            tokio::select! {
                biased;
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        break Wait::Cancelled;
                    }
                }
                response = &mut call => break Wait::Response(response),
                () = &mut deadline => break Wait::TimedOut,
                _ = ticker.tick() => {
                    let update = simulator.advance(&mut rng);
                    debug!(generation, percent = update.percent, "progress tick");
                    if tx.send(SessionEvent::Progress { generation, update }).await.is_err() {
                        break Wait::Cancelled;
                    }
                }
            }
        }
    };

    let outcome = match wait {
        Wait::Cancelled => {
            info!(generation, "analysis cancelled");
            return;
        }
        Wait::TimedOut => Err(AnalysisError::Timeout {
            secs: config.timeout.as_secs(),
        }),
        Wait::Response(Err(e)) => Err(e),
        Wait::Response(Ok(raw)) => {
            send_progress(&tx, generation, RESPONSE_RECEIVED_PERCENT, PROCESSING_STATUS).await;
            analysis_from_response(&raw)
        }
    };

    let outcome = match outcome {
        Ok(result) => {
            send_progress(&tx, generation, COMPLETE_PERCENT, COMPLETE_STATUS).await;
            let _delay_guard = timers.guard();
            let delay = tokio::time::sleep(config.completion_delay);
            tokio::pin!(delay);
            loop {
                tokio::select! {
                    biased;
                    changed = cancel_rx.changed() => {
                        if changed.is_err() || *cancel_rx.borrow() {
                            info!(generation, "analysis cancelled during completion delay");
                            return;
                        }
                    }
                    () = &mut delay => break,
                }
            }
            info!(generation, films = result.similar_films.len(), "analysis complete");
            Ok(result)
        }
        Err(e) => {
            warn!(generation, category = ?e.category(), error = %e, "analysis failed");
            Err(e)
        }
    };

    tx.send(SessionEvent::Finished {
        generation,
        outcome,
    })
    .await
    .ok();
}

async fn send_progress(
    tx: &mpsc::Sender<SessionEvent>,
    generation: u64,
    percent: u8,
    status: &'static str,
) {
    tx.send(SessionEvent::Progress {
        generation,
        update: ProgressUpdate { percent, status },
    })
    .await
    .ok();
}
