//! `CinePlot` - find films with plots like yours
//!
//! Entry point for the application.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cineplot::app::App;
use cineplot::cli::Args;
use cineplot::tui::TerminalEventGuard;

/// How long to wait for terminal input before drawing the next frame.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file_path());

    let mut app = App::new(args.analyzer_config(), !args.no_backdrop);
    if let Some(path) = &args.plot_file {
        app.load_plot_file(path)?;
    }

    // Initialize the terminal with crossterm backend
    let mut terminal = ratatui::init();

    let result = run_app(&mut terminal, &mut app);

    app.shutdown();
    ratatui::restore();

    if let Err(e) = &result {
        error!(error = %e, "application error");
    }
    info!("exiting");
    result
}

/// Sends logs to `path`, since stdout belongs to the TUI.
///
/// Logging stays off if the file cannot be opened.
fn init_logging(path: &Path) {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    info!(path = %path.display(), "logging initialised");
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    // Must come after ratatui::init, which can reset terminal flags.
    let _event_guard = TerminalEventGuard::new();

    loop {
        // Layout is computed inside the draw closure so it uses the same
        // area as rendering.
        terminal
            .draw(|frame| {
                app.update_layout(frame.area());
                app.render(frame);
            })
            .context("failed to draw frame")?;

        if event::poll(POLL_INTERVAL).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        app.process_events();
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
