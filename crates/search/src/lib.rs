//! hatetris search crate - best-first search over distinct boards.
//!
//! The [`Solver`] pops the highest-scoring board from the [`Frontier`],
//! expands it through an [`ExpansionPool`] and queues the children that
//! improve on what is already known. Boards are identified by their rows;
//! how a board was reached lives in the [`Arena`].

mod arena;
mod config;
mod error;
mod frontier;
pub mod pool;
mod report;
mod solver;

pub use arena::{Arena, NodeId};
pub use config::SolverConfig;
pub use error::SearchError;
pub use frontier::{Entry, Frontier};
pub use pool::{ExpansionPool, InlinePool, PendingExpansion, RayonPool};
pub use report::{LogReporter, Progress, Reporter, Solution};
pub use solver::{SearchOutcome, Solver, StopReason};
