//! hatetris-engine - game rules, placement search and the adversary.
//!
//! Everything here is a pure function of board values, so expansions can
//! run on any thread.

pub mod adversary;
pub mod movement;
pub mod placement;
pub mod replay;

pub use adversary::{choose, worst_piece, AdversaryChoice};
pub use movement::{handle_move, lock, MoveResult};
pub use placement::{explore, min_height, placements, Exploration, Placement, SearchMode};
pub use replay::{replay, LockEvent, Replay, ReplayLog, Step};

use hatetris_core::{Board, Piece};

/// Children of one board: the adversary's piece and every placement of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    pub piece: Piece,
    pub placements: Vec<Placement>,
}

/// One full expansion step: pick the adversary's piece, then enumerate
/// all its placements.
pub fn expand(board: &Board) -> Expansion {
    let piece = worst_piece(board);
    Expansion {
        piece,
        placements: placements(board, piece),
    }
}
