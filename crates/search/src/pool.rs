//! Expansion pools. A pool takes a board value and hands back a pending
//! expansion; how the work runs is up to the pool.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver};
use hatetris_core::Board;
use hatetris_engine::{expand, Expansion};
use log::trace;

use crate::SearchError;

/// The work a pool runs per board.
pub type Expander = dyn Fn(&Board) -> Expansion + Send + Sync;

/// Why a dispatched expansion produced no result.
pub type Failure = String;

/// An expansion that may still be running.
pub enum PendingExpansion {
    Ready(Result<Expansion, Failure>),
    Waiting(Receiver<Result<Expansion, Failure>>),
}

impl PendingExpansion {
    /// Block until the result is available.
    pub fn wait(self) -> Result<Expansion, Failure> {
        match self {
            PendingExpansion::Ready(result) => result,
            PendingExpansion::Waiting(rx) => rx
                .recv()
                .unwrap_or_else(|_| Err("worker dropped its result channel".to_string())),
        }
    }
}

pub trait ExpansionPool {
    /// Maximum number of expansions the driver keeps in flight.
    fn window(&self) -> usize;

    fn submit(&self, board: Board) -> PendingExpansion;
}

fn panic_message(payload: Box<dyn Any + Send>) -> Failure {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "expansion panicked".to_string()
    }
}

fn run_guarded(expander: &Expander, board: &Board) -> Result<Expansion, Failure> {
    panic::catch_unwind(AssertUnwindSafe(|| expander(board))).map_err(panic_message)
}

/// Runs every expansion on the calling thread at submit time.
pub struct InlinePool {
    expander: Arc<Expander>,
}

impl InlinePool {
    pub fn new() -> Self {
        Self::with_expander(Arc::new(|board: &Board| expand(board)))
    }

    pub fn with_expander(expander: Arc<Expander>) -> Self {
        Self { expander }
    }
}

impl Default for InlinePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionPool for InlinePool {
    fn window(&self) -> usize {
        1
    }

    fn submit(&self, board: Board) -> PendingExpansion {
        PendingExpansion::Ready(run_guarded(self.expander.as_ref(), &board))
    }
}

/// Fixed-size rayon pool. Results come back over a one-shot channel.
pub struct RayonPool {
    pool: rayon::ThreadPool,
    workers: usize,
    expander: Arc<Expander>,
}

impl RayonPool {
    pub fn new(workers: usize) -> Result<Self, SearchError> {
        Self::with_expander(workers, Arc::new(|board: &Board| expand(board)))
    }

    pub fn with_expander(workers: usize, expander: Arc<Expander>) -> Result<Self, SearchError> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hatetris-expand-{i}"))
            .build()?;
        Ok(Self {
            pool,
            workers,
            expander,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl ExpansionPool for RayonPool {
    fn window(&self) -> usize {
        2 * self.workers
    }

    fn submit(&self, board: Board) -> PendingExpansion {
        let (tx, rx) = bounded(1);
        let expander = Arc::clone(&self.expander);
        self.pool.spawn(move || {
            let result = run_guarded(expander.as_ref(), &board);
            // receiver gone means the driver stopped early
            if tx.send(result).is_err() {
                trace!("expansion result discarded");
            }
        });
        PendingExpansion::Waiting(rx)
    }
}
