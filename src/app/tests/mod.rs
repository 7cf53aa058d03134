//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `flow` - Submission, progress, results, failures and cancellation
//! - `helpers` - Shared test utilities
//! - `input` - Key bindings, paste handling and plot files
//! - `ui` - Rendering of each view

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
