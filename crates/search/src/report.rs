//! Observers for the search. Nothing here feeds back into search state.

use std::time::Duration;

use hatetris_core::{Board, Trace};
use log::info;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub score: u32,
    /// Pops done when this board came off the frontier.
    pub expansions: u64,
    pub elapsed: Duration,
    pub trace: Trace,
    pub encoded: String,
    pub board: Board,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub expansions: u64,
    pub frontier_len: usize,
    pub seen: usize,
    pub best_score: u32,
    /// Pops at the best score since it was last raised.
    pub ties: u64,
    pub current_score: u32,
    pub current_height: u32,
}

pub trait Reporter {
    fn on_new_best(&mut self, _solution: &Solution) {}

    fn on_progress(&mut self, _progress: &Progress) {}
}

impl Reporter for () {}

/// Keeps every new best, in order.
impl Reporter for Vec<Solution> {
    fn on_new_best(&mut self, solution: &Solution) {
        self.push(solution.clone());
    }
}

/// Forwards everything to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_new_best(&mut self, solution: &Solution) {
        info!(
            "(t={:.2}s, pop {}) new best score {}: {}",
            solution.elapsed.as_secs_f64(),
            solution.expansions,
            solution.score,
            solution.encoded
        );
    }

    fn on_progress(&mut self, p: &Progress) {
        info!(
            "pop {}: {} queued, {} seen, best {} ({} ties), current {} (height {})",
            p.expansions, p.frontier_len, p.seen, p.best_score, p.ties, p.current_score, p.current_height
        );
    }
}
