//! Simulated progress for the analyzing screen.
//!
//! The service gives no progress signal, so the bar is synthetic: it creeps
//! up by random steps, never passes [`PROGRESS_CAP`] on its own, and is only
//! pushed to 95 and 100 once the response is in.

use rand::Rng;

/// Highest value the simulator reaches before the response arrives.
pub const PROGRESS_CAP: f64 = 90.0;

/// Upper bound (exclusive) of a single random step.
pub const MAX_STEP: f64 = 15.0;

/// Progress shown once the response has arrived and is being processed.
pub const RESPONSE_RECEIVED_PERCENT: u8 = 95;

/// Progress shown once the result has been validated.
pub const COMPLETE_PERCENT: u8 = 100;

/// Status shown before the first timer tick.
pub const INITIAL_STATUS: &str = "Initializing analysis...";

/// Status shown at [`RESPONSE_RECEIVED_PERCENT`].
pub const PROCESSING_STATUS: &str = "Processing results...";

/// Status shown at [`COMPLETE_PERCENT`].
pub const COMPLETE_STATUS: &str = "Analysis complete!";

/// Canned status lines, in the order the bar passes through them.
pub const LOADING_STEPS: [&str; 12] = [
    "Parsing plot elements...",
    "Extracting themes and motifs...",
    "Analyzing character archetypes...",
    "Identifying narrative structure...",
    "Searching global cinema database...",
    "Matching with Bollywood films...",
    "Scanning Korean cinema...",
    "Checking European films...",
    "Analyzing Japanese cinema...",
    "Reviewing world cinema...",
    "Calculating similarity scores...",
    "Finalizing results...",
];

/// Regional coverage checklist shown under the progress bar.
pub const COVERAGE_REGIONS: [&str; 6] = [
    "Bollywood & Indian Cinema",
    "Korean Films & K-Drama",
    "Japanese Cinema & Anime",
    "European Art Films",
    "Latin American Cinema",
    "African & Middle Eastern Films",
];

/// Progress points covered by each checklist entry.
const REGION_SPAN: u8 = 15;

/// Maps a progress value to its status line.
///
/// Uses `floor(progress / 100 * 12)` as the step index; values at or past
/// 100 map to the last step.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)] // clamped to 0..=11
pub fn progress_to_status(progress: f64) -> &'static str {
    let index = (progress / 100.0 * LOADING_STEPS.len() as f64).floor();
    let index = index.clamp(0.0, (LOADING_STEPS.len() - 1) as f64) as usize;
    LOADING_STEPS[index]
}

/// State of one checklist entry for a given progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Pending,
    Active,
    Done,
}

/// Returns the state of checklist entry `index` at `percent`.
#[must_use]
pub fn region_state(index: usize, percent: u8) -> RegionState {
    let span = usize::from(REGION_SPAN);
    let percent = usize::from(percent);
    if percent > (index + 1) * span {
        RegionState::Done
    } else if percent > index * span {
        RegionState::Active
    } else {
        RegionState::Pending
    }
}

/// A progress value paired with its status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Whole percent, 0-100.
    pub percent: u8,
    pub status: &'static str,
}

/// Timer-independent progress state.
///
/// Each call to [`advance`](Self::advance) stands for one timer tick.
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    progress: f64,
}

impl ProgressSimulator {
    /// Creates a simulator at 0%.
    #[must_use]
    pub const fn new() -> Self {
        Self { progress: 0.0 }
    }

    /// Current progress, unrounded.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Adds a random step in `[0, MAX_STEP)`, capped at [`PROGRESS_CAP`].
    ///
    /// Once the cap is reached further calls leave the value unchanged.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> ProgressUpdate {
        if self.progress < PROGRESS_CAP {
            let step = rng.gen_range(0.0..MAX_STEP);
            self.progress = (self.progress + step).min(PROGRESS_CAP);
        }
        self.update()
    }

    /// Returns the update for the current value without advancing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0.0..=90.0
    pub fn update(&self) -> ProgressUpdate {
        ProgressUpdate {
            percent: self.progress.floor() as u8,
            status: progress_to_status(self.progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn status_mapping_uses_twelve_steps() {
        assert_eq!(progress_to_status(0.0), "Parsing plot elements...");
        assert_eq!(progress_to_status(8.3), "Parsing plot elements...");
        assert_eq!(progress_to_status(8.4), "Extracting themes and motifs...");
        assert_eq!(progress_to_status(50.0), "Scanning Korean cinema...");
        assert_eq!(progress_to_status(90.0), "Calculating similarity scores...");
        assert_eq!(progress_to_status(99.9), "Finalizing results...");
    }

    #[test]
    fn status_mapping_clamps_out_of_range() {
        assert_eq!(progress_to_status(100.0), "Finalizing results...");
        assert_eq!(progress_to_status(250.0), "Finalizing results...");
        assert_eq!(progress_to_status(-5.0), "Parsing plot elements...");
    }

    #[test]
    fn simulator_starts_at_zero() {
        let sim = ProgressSimulator::new();
        assert_eq!(sim.update().percent, 0);
        assert_eq!(sim.update().status, "Parsing plot elements...");
    }

    #[test]
    fn progress_is_monotonic_and_capped() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sim = ProgressSimulator::new();
            let mut last = 0.0;
            for _ in 0..200 {
                let update = sim.advance(&mut rng);
                assert!(sim.progress() >= last, "seed {seed} went backwards");
                assert!(sim.progress() <= PROGRESS_CAP);
                assert!(update.percent <= 90);
                last = sim.progress();
            }
            assert!((sim.progress() - PROGRESS_CAP).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn single_step_is_below_max_step() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut sim = ProgressSimulator::new();
            sim.advance(&mut rng);
            assert!(sim.progress() < MAX_STEP);
        }
    }

    #[test]
    fn region_states_follow_fifteen_point_bands() {
        assert_eq!(region_state(0, 0), RegionState::Pending);
        assert_eq!(region_state(0, 1), RegionState::Active);
        assert_eq!(region_state(0, 15), RegionState::Active);
        assert_eq!(region_state(0, 16), RegionState::Done);
        assert_eq!(region_state(2, 30), RegionState::Pending);
        assert_eq!(region_state(2, 31), RegionState::Active);
        assert_eq!(region_state(5, 91), RegionState::Done);
        assert_eq!(region_state(5, 90), RegionState::Active);
        assert_eq!(region_state(5, 80), RegionState::Active);
    }
}
