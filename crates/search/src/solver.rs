//! Best-first solver driver.
//!
//! The driver owns the arena and the frontier. Expansions are handed to an
//! [`ExpansionPool`] and drained strictly in dispatch order, so reporting
//! only depends on the pool's window, never on worker timing.

use std::collections::VecDeque;
use std::time::Instant;

use hatetris_core::{Board, Move, WellConfig};
use hatetris_engine::{replay, Expansion, Placement, ReplayLog};
use log::{debug, info, trace, warn};
use serde::Serialize;

use crate::arena::Arena;
use crate::frontier::{Entry, Frontier};
use crate::pool::{ExpansionPool, InlinePool, PendingExpansion, RayonPool};
use crate::report::{Progress, Reporter, Solution};
use crate::{SearchError, SolverConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// Every reachable board was expanded.
    Exhausted,
    /// A popped board reached `stop_score`.
    ScoreReached,
    /// `max_expansions` boards were popped.
    BudgetSpent,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub best: Option<Solution>,
    pub expansions: u64,
    pub seen: usize,
    pub reason: StopReason,
}

impl SearchOutcome {
    pub fn best_score(&self) -> Option<u32> {
        self.best.as_ref().map(|s| s.score)
    }
}

struct InFlight {
    entry: Entry,
    job: PendingExpansion,
}

pub struct Solver {
    config: SolverConfig,
    root: Board,
    arena: Arena,
    frontier: Frontier,
    best: Option<Solution>,
    ties: u64,
    expansions: u64,
    started: Instant,
}

impl Solver {
    /// Solver over an empty well.
    pub fn new(config: SolverConfig, well: &WellConfig) -> Result<Self, SearchError> {
        well.validate()?;
        Self::with_board(config, Board::empty(well))
    }

    /// Solver starting from `board` at score 0.
    pub fn with_board(config: SolverConfig, board: Board) -> Result<Self, SearchError> {
        board.config().validate()?;
        board.check_buffer()?;
        let arena = Arena::new();
        let mut frontier = Frontier::new();
        frontier.add(board.clone(), 0, || arena.root());
        Ok(Self {
            config,
            root: board,
            arena,
            frontier,
            best: None,
            ties: 0,
            expansions: 0,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn root(&self) -> &Board {
        &self.root
    }

    /// Replay `moves` from the root and queue every locked board at its
    /// running score, so the search picks up where the trace left off.
    pub fn seed(&mut self, moves: &[Move]) -> ReplayLog {
        let log = replay(self.root.clone(), moves);
        let mut parent = self.arena.root();
        for lock in &log.locks {
            // the chain is kept even when the frontier already knows a board
            let node = self.arena.push(parent, lock.segment.clone());
            self.frontier.add(lock.board.clone(), lock.score, || node);
            parent = node;
        }
        info!(
            "seeded {} moves: {} locks, score {}",
            moves.len(),
            log.locks.len(),
            log.score()
        );
        if let Some(at) = log.game_over_at {
            warn!("seed trace hits game over at move {at}; later moves ignored");
        }
        log
    }

    /// Run with the pool the config asks for.
    pub fn solve<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<SearchOutcome, SearchError> {
        if self.config.workers == 0 {
            self.run(&InlinePool::new(), reporter)
        } else {
            let pool = RayonPool::new(self.config.workers)?;
            info!("expanding on {} worker threads", pool.workers());
            self.run(&pool, reporter)
        }
    }

    pub fn run<P, R>(&mut self, pool: &P, reporter: &mut R) -> Result<SearchOutcome, SearchError>
    where
        P: ExpansionPool + ?Sized,
        R: Reporter + ?Sized,
    {
        let window = pool.window().max(1);
        let mut pending: VecDeque<InFlight> = VecDeque::with_capacity(window);
        let mut out_of_budget = false;

        loop {
            while !out_of_budget && pending.len() < window {
                if self.config.max_expansions.is_some_and(|max| self.expansions >= max) {
                    out_of_budget = true;
                    break;
                }
                let Some(entry) = self.frontier.pop() else {
                    break;
                };
                self.expansions += 1;
                self.observe(&entry, reporter);

                if self.config.stop_score.is_some_and(|stop| entry.score >= stop) {
                    // in-flight expansions are dropped with `pending`
                    return Ok(self.finish(StopReason::ScoreReached));
                }

                trace!("dispatch node {} (score {})", entry.node.index(), entry.score);
                let job = pool.submit(entry.board.clone());
                pending.push_back(InFlight { entry, job });
            }

            let Some(InFlight { entry, job }) = pending.pop_front() else {
                let reason = if out_of_budget {
                    StopReason::BudgetSpent
                } else {
                    StopReason::Exhausted
                };
                return Ok(self.finish(reason));
            };
            let expansion = job.wait().map_err(|reason| SearchError::WorkerFailed {
                node: entry.node.index(),
                reason,
            })?;
            trace!("drain node {}", entry.node.index());
            self.attach(&entry, expansion);
        }
    }

    /// Queue the children of a drained expansion under its node.
    fn attach(&mut self, entry: &Entry, expansion: Expansion) {
        let children = expansion.placements.len();
        let mut accepted = 0;
        let (frontier, arena) = (&mut self.frontier, &mut self.arena);
        for Placement { board, lines, segment } in expansion.placements {
            if frontier.add(board, entry.score + lines, || arena.push(entry.node, segment)) {
                accepted += 1;
            }
        }
        debug!(
            "node {} (score {}, height {}): {} -> {accepted}/{children} children queued",
            entry.node.index(),
            entry.score,
            entry.height,
            expansion.piece
        );
    }

    fn observe<R: Reporter + ?Sized>(&mut self, entry: &Entry, reporter: &mut R) {
        match self.best.as_ref().map(|s| s.score) {
            Some(best) if entry.score < best => {}
            Some(best) if entry.score == best => self.ties += 1,
            _ => {
                let trace = self.arena.trace(entry.node);
                let solution = Solution {
                    score: entry.score,
                    expansions: self.expansions,
                    elapsed: self.started.elapsed(),
                    encoded: trace.encode(),
                    trace,
                    board: entry.board.clone(),
                };
                info!(
                    "new best score {} after {} pops ({} pieces)",
                    solution.score,
                    solution.expansions,
                    solution.trace.pieces()
                );
                reporter.on_new_best(&solution);
                self.best = Some(solution);
                self.ties = 0;
            }
        }

        let interval = self.config.progress_interval;
        if interval > 0 && self.expansions % interval == 0 {
            reporter.on_progress(&Progress {
                expansions: self.expansions,
                frontier_len: self.frontier.len(),
                seen: self.frontier.seen(),
                best_score: self.best.as_ref().map_or(0, |s| s.score),
                ties: self.ties,
                current_score: entry.score,
                current_height: entry.height,
            });
        }
    }

    fn finish(&self, reason: StopReason) -> SearchOutcome {
        info!(
            "search stopped ({reason:?}) after {} pops, {} boards seen, best {:?}",
            self.expansions,
            self.frontier.seen(),
            self.best.as_ref().map(|s| s.score)
        );
        SearchOutcome {
            best: self.best.clone(),
            expansions: self.expansions,
            seen: self.frontier.seen(),
            reason,
        }
    }

    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Distinct boards the frontier has accepted.
    pub fn seen(&self) -> usize {
        self.frontier.seen()
    }

    /// Boards recorded in the history arena, root included.
    pub fn nodes(&self) -> usize {
        self.arena.len()
    }
}
