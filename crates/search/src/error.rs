use hatetris_core::{BoardParseError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// A dispatched expansion produced no result. Its children would be lost,
    /// so the search cannot continue.
    #[error("expansion of node {node} failed: {reason}")]
    WorkerFailed { node: usize, reason: String },
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("invalid well: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid start board: {0}")]
    Board(#[from] BoardParseError),
}
