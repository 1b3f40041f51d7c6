//! Adversary selector - the next piece is the one whose best placement
//! leaves the highest stack.

use hatetris_core::{Board, Piece};

use crate::placement::min_height;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdversaryChoice {
    pub piece: Piece,
    /// Best height the player can reach with that piece.
    pub height: u32,
}

/// Probe every piece in canonical order and keep the strictly worst one,
/// so ties go to the earliest piece.
pub fn choose(board: &Board) -> AdversaryChoice {
    let mut worst = AdversaryChoice {
        piece: Piece::ALL[0],
        height: min_height(board, Piece::ALL[0]),
    };
    for piece in Piece::ALL.into_iter().skip(1) {
        let height = min_height(board, piece);
        if height > worst.height {
            worst = AdversaryChoice { piece, height };
        }
    }
    worst
}

#[inline]
pub fn worst_piece(board: &Board) -> Piece {
    choose(board).piece
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatetris_core::WellConfig;

    #[test]
    fn test_empty_board_picks_s() {
        let board = Board::empty(&WellConfig::hatetris());
        let choice = choose(&board);
        assert_eq!(choice, AdversaryChoice { piece: Piece::S, height: 2 });
    }

    #[test]
    fn test_choice_is_stable_across_runs() {
        let board = Board::empty(&WellConfig::hatetris());
        let first = worst_piece(&board);
        for _ in 0..5 {
            assert_eq!(worst_piece(&board), first);
        }
    }

    #[test]
    fn test_tie_goes_to_earliest_piece() {
        // S and O both leave height 6 here; S comes first
        let mut rows = [0u16; 20];
        for row in rows.iter_mut().skip(16) {
            *row = 0x3FF & !1;
        }
        let board = Board::from_rows(&WellConfig::hatetris(), &rows);
        assert_eq!(min_height(&board, Piece::S), 6);
        assert_eq!(min_height(&board, Piece::O), 6);
        assert_eq!(min_height(&board, Piece::I), 0);
        assert_eq!(
            choose(&board),
            AdversaryChoice {
                piece: Piece::S,
                height: 6
            }
        );
    }
}
