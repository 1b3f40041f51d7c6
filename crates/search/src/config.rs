use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Expansion threads. 0 runs everything on the driver thread.
    pub workers: usize,
    /// Stop once a popped board reaches this score.
    pub stop_score: Option<u32>,
    /// Stop after this many pops.
    pub max_expansions: Option<u64>,
    /// Pops between progress reports; 0 disables them.
    pub progress_interval: u64,
}

impl SolverConfig {
    pub fn sequential() -> Self {
        Self {
            workers: 0,
            stop_score: None,
            max_expansions: None,
            progress_interval: 10,
        }
    }

    pub fn parallel(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            ..Self::sequential()
        }
    }

    pub fn with_stop_score(mut self, score: u32) -> Self {
        self.stop_score = Some(score);
        self
    }

    pub fn with_max_expansions(mut self, expansions: u64) -> Self {
        self.max_expansions = Some(expansions);
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::sequential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SolverConfig::default(), SolverConfig::sequential());
        assert_eq!(SolverConfig::parallel(0).workers, 1);
        let cfg = SolverConfig::parallel(4)
            .with_stop_score(30)
            .with_max_expansions(1_000)
            .with_progress_interval(0);
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.stop_score, Some(30));
        assert_eq!(cfg.max_expansions, Some(1_000));
        assert_eq!(cfg.progress_interval, 0);
    }
}
