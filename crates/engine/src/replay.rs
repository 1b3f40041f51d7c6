//! Trace replay - drive the game one keypress at a time with the
//! adversary choosing every piece.

use hatetris_core::{Board, Move, Piece, PieceState, PlaceOutcome};
use log::debug;

use crate::adversary::worst_piece;
use crate::movement::{handle_move, lock, MoveResult};

/// A piece that just locked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockEvent {
    /// Index of the locking move within the replayed trace.
    pub move_index: usize,
    pub piece: Piece,
    pub board: Board,
    pub lines: u32,
    /// Cumulative score after this lock.
    pub score: u32,
    /// Moves since the previous lock, including this one's drop.
    pub segment: Vec<Move>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Moved,
    /// Blocked move; the piece did not change. It still counts as part of
    /// the trace.
    Rejected,
    Locked(LockEvent),
    GameOver,
}

pub struct Replay {
    board: Board,
    state: PieceState,
    score: u32,
    pieces: u32,
    moves: usize,
    segment: Vec<Move>,
    over: bool,
}

impl Replay {
    /// Start from `board` with the adversary's first piece.
    pub fn new(board: Board) -> Self {
        let piece = worst_piece(&board);
        Self::with_piece(board, piece)
    }

    /// Start from `board` with a given first piece. Later pieces still come
    /// from the adversary.
    pub fn with_piece(board: Board, piece: Piece) -> Self {
        let state = PieceState::spawn(piece, &board.config());
        Self {
            board,
            state,
            score: 0,
            pieces: 1,
            moves: 0,
            segment: Vec::new(),
            over: false,
        }
    }

    pub fn step(&mut self, mv: Move) -> Step {
        if self.over {
            return Step::GameOver;
        }
        let move_index = self.moves;
        self.moves += 1;
        self.segment.push(mv);

        match handle_move(&self.board, &self.state, mv) {
            MoveResult::Moved(next) => {
                self.state = next;
                Step::Moved
            }
            MoveResult::Rejected => Step::Rejected,
            MoveResult::Locked => match lock(&self.board, &self.state) {
                PlaceOutcome::GameOver => {
                    debug!("game over at move {move_index} after {} pieces", self.pieces);
                    self.over = true;
                    Step::GameOver
                }
                PlaceOutcome::Placed { board, lines } => {
                    let piece = self.state.piece;
                    self.score += lines;
                    self.board = board;
                    self.state = PieceState::spawn(worst_piece(&self.board), &self.board.config());
                    self.pieces += 1;
                    Step::Locked(LockEvent {
                        move_index,
                        piece,
                        board: self.board.clone(),
                        lines,
                        score: self.score,
                        segment: std::mem::take(&mut self.segment),
                    })
                }
            },
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece currently in flight.
    pub fn state(&self) -> &PieceState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pieces seen so far, counting the one in flight.
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn is_over(&self) -> bool {
        self.over
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayLog {
    pub locks: Vec<LockEvent>,
    /// Move index of the drop that ended the game, if any.
    pub game_over_at: Option<usize>,
}

impl ReplayLog {
    pub fn score(&self) -> u32 {
        self.locks.last().map_or(0, |lock| lock.score)
    }
}

/// Replay `moves` from `board`. Stops at game over; moves after the last
/// lock are consumed but produce no event.
pub fn replay(board: Board, moves: &[Move]) -> ReplayLog {
    let mut game = Replay::new(board);
    let mut log = ReplayLog::default();
    for (i, &mv) in moves.iter().enumerate() {
        match game.step(mv) {
            Step::Locked(event) => log.locks.push(event),
            Step::GameOver => {
                log.game_over_at = Some(i);
                break;
            }
            Step::Moved | Step::Rejected => {}
        }
    }
    log
}
