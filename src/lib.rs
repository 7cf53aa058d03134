//! `CinePlot` - find films with plots like yours
//!
//! Sends a plot description to a language model and shows the ranked list of
//! similar films from world cinema in a terminal UI.

pub mod app;
pub mod cli;
pub mod core;
pub mod tui;
