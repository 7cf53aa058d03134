//! Custom TUI widgets.

pub mod backdrop;
pub mod film_card;
pub mod progress_panel;
pub mod summary_panel;
pub mod text;

pub use backdrop::{Backdrop, Decoration};
pub use film_card::{FilmCard, score_bar};
pub use progress_panel::{PROGRESS_PANEL_HEIGHT, ProgressPanel};
pub use summary_panel::summary_lines;
pub use text::wrap_text;
