//! Best-first frontier with per-board score dedup.
//!
//! Pop order: highest score, then lowest height, then row contents.
//! A board is only queued again when it arrives with a strictly higher
//! score than the one recorded for it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hatetris_core::Board;
use rustc_hash::FxHashMap;

use crate::arena::NodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub score: u32,
    pub height: u32,
    pub board: Board,
    pub node: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: "greater" pops first
        self.score
            .cmp(&other.score)
            .then_with(|| other.height.cmp(&self.height))
            .then_with(|| other.board.cmp(&self.board))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    best: FxHashMap<Board, u32>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `board` at `score` unless it is already known with an equal or
    /// better score. `node` is only called when the board is accepted.
    pub fn add<F: FnOnce() -> NodeId>(&mut self, board: Board, score: u32, node: F) -> bool {
        match self.best.get_mut(&board) {
            Some(known) if *known >= score => return false,
            Some(known) => *known = score,
            None => {
                self.best.insert(board.clone(), score);
            }
        }
        let height = board.height();
        self.heap.push(Entry {
            score,
            height,
            board,
            node: node(),
        });
        true
    }

    /// Highest-priority live entry. Entries superseded by a later, higher
    /// score for the same board are dropped on the way.
    pub fn pop(&mut self) -> Option<Entry> {
        while let Some(entry) = self.heap.pop() {
            if self.best.get(&entry.board) == Some(&entry.score) {
                return Some(entry);
            }
        }
        None
    }

    /// Best score recorded for `board`, if it was ever queued.
    pub fn recorded(&self, board: &Board) -> Option<u32> {
        self.best.get(board).copied()
    }

    /// Queued entries, superseded ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Distinct boards ever accepted.
    pub fn seen(&self) -> usize {
        self.best.len()
    }
}
