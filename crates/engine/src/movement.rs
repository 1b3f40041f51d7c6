//! Atomic moves. A handler only reports that a lock happened; turning the
//! lock into a new board is `lock`'s job.

use hatetris_core::{Board, Move, PieceState, PlaceOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The piece may continue from this pose.
    Moved(PieceState),
    /// Blocked shift or rotation. The pose is unchanged.
    Rejected,
    /// A soft drop hit something; the piece locks at its current pose.
    Locked,
}

pub fn handle_move(board: &Board, state: &PieceState, mv: Move) -> MoveResult {
    let next = match mv {
        Move::Left => state.shifted(-1, 0),
        Move::Right => state.shifted(1, 0),
        Move::Down => {
            let next = state.shifted(0, 1);
            return if board.collision(&next.cells()) {
                MoveResult::Locked
            } else {
                MoveResult::Moved(next)
            };
        }
        // square piece: rotation is accepted and changes nothing
        Move::Rotate if !state.piece.rotates() => return MoveResult::Moved(*state),
        Move::Rotate => state.rotated(),
    };

    if board.collision(&next.cells()) {
        MoveResult::Rejected
    } else {
        MoveResult::Moved(next)
    }
}

/// Resolve a lock: place the piece cells and collapse full rows.
#[inline]
pub fn lock(board: &Board, state: &PieceState) -> PlaceOutcome {
    board.place(&state.cells())
}
