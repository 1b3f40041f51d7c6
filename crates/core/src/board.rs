//! board representation - one u16 bitmask per row, row 0 at the top
//!
//! Boards are values: `place` never mutates, it builds the child board.
//! Equality, ordering and hashing only look at the occupancy, so two
//! boards reached by different move paths compare equal.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PieceState, WellConfig};

/// Height reported for a placement that ends the game. Worse than any
/// real stack height.
pub const GAME_OVER_HEIGHT: u32 = u32::MAX;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("grid has more than {capacity} cells")]
    TooManyCells { capacity: usize },
    #[error("occupied cell ({x}, {y}) lies in the buffer zone")]
    OccupiedBuffer { x: usize, y: usize },
}

/// Result of locking a piece into a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Some cell landed in the buffer zone; no child board exists.
    GameOver,
    Placed { board: Board, lines: u32 },
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    bar: u8,
    rows: Vec<u16>,
}

impl Board {
    pub fn empty(config: &WellConfig) -> Self {
        Self {
            width: config.width,
            bar: config.bar,
            rows: vec![0; config.depth as usize],
        }
    }

    /// Build from raw row masks, top row first. Bits at or above `width`
    /// are dropped.
    pub fn from_rows(config: &WellConfig, rows: &[u16]) -> Self {
        let mut board = Self::empty(config);
        let full = config.full_row();
        for (dst, &src) in board.rows.iter_mut().zip(rows) {
            *dst = src & full;
        }
        board
    }

    pub fn config(&self) -> WellConfig {
        WellConfig {
            width: self.width,
            depth: self.depth() as u8,
            bar: self.bar,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    #[inline(always)]
    pub fn bar(&self) -> usize {
        self.bar as usize
    }

    #[inline(always)]
    pub fn row(&self, y: usize) -> u16 {
        self.rows[y]
    }

    #[inline]
    pub fn rows(&self) -> &[u16] {
        &self.rows
    }

    #[inline(always)]
    fn full_row(&self) -> u16 {
        (((1u32) << self.width) - 1) as u16
    }

    #[inline(always)]
    fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < self.width() && y >= 0 && (y as usize) < self.depth()
    }

    /// Bounds-checked membership test. Cells outside the well read as empty.
    #[inline]
    pub fn occupied(&self, x: i8, y: i8) -> bool {
        self.in_bounds(x, y) && (self.rows[y as usize] >> x) & 1 == 1
    }

    /// True if any cell is outside the well or already taken.
    #[inline]
    pub fn collision(&self, cells: &[(i8, i8)]) -> bool {
        cells
            .iter()
            .any(|&(x, y)| !self.in_bounds(x, y) || (self.rows[y as usize] >> x) & 1 == 1)
    }

    /// Lock `cells` into a copy of this board and collapse full rows.
    ///
    /// Panics if a cell is out of bounds or already occupied; callers only
    /// place poses that passed `collision`.
    pub fn place(&self, cells: &[(i8, i8)]) -> PlaceOutcome {
        if cells.iter().any(|&(_, y)| (y as isize) < self.bar as isize) {
            return PlaceOutcome::GameOver;
        }

        let mut next = self.clone();
        for &(x, y) in cells {
            assert!(self.in_bounds(x, y), "cell ({x}, {y}) outside the well");
            let mask = 1u16 << x;
            let row = &mut next.rows[y as usize];
            assert!(*row & mask == 0, "cell ({x}, {y}) already occupied");
            *row |= mask;
        }

        let lines = next.collapse_full_rows();
        PlaceOutcome::Placed { board: next, lines }
    }

    /// Bottom-up scan; a cleared row pulls everything above it down by one
    /// and the same index is tested again. Row 0 is never tested.
    fn collapse_full_rows(&mut self) -> u32 {
        let full = self.full_row();
        let mut lines = 0;
        let mut y = self.depth() - 1;
        while y >= 1 {
            if self.rows[y] == full {
                lines += 1;
                self.rows.copy_within(0..y, 1);
                self.rows[0] = 0;
            } else {
                y -= 1;
            }
        }
        lines
    }

    /// Number of contiguous non-empty rows counted up from the floor.
    /// Empty board: 0. No empty row at all: full depth.
    pub fn height(&self) -> u32 {
        match self.rows.iter().rposition(|&row| row == 0) {
            Some(y) => (self.depth() - y - 1) as u32,
            None => self.depth() as u32,
        }
    }

    #[inline]
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.rows[y] == 0
    }

    /// Only a game-over outcome may have cells in the buffer zone, so a
    /// board to play from must pass this.
    pub fn check_buffer(&self) -> Result<(), BoardParseError> {
        for (y, &row) in self.rows.iter().enumerate().take(self.bar()) {
            if row != 0 {
                let x = row.trailing_zeros() as usize;
                return Err(BoardParseError::OccupiedBuffer { x, y });
            }
        }
        Ok(())
    }

    /// Read the `:`/`.`/`*` grid, row-major from the top. `#` marks an
    /// in-flight piece cell and counts as empty; any other character is
    /// ignored.
    pub fn parse(config: &WellConfig, text: &str) -> Result<Self, BoardParseError> {
        let mut board = Self::empty(config);
        let width = board.width();
        let capacity = width * board.depth();
        let mut index = 0usize;

        for c in text.chars() {
            if !matches!(c, ':' | '.' | '#' | '*') {
                continue;
            }
            if index >= capacity {
                return Err(BoardParseError::TooManyCells { capacity });
            }
            let (x, y) = (index % width, index / width);
            if c == '*' {
                if y < board.bar() {
                    return Err(BoardParseError::OccupiedBuffer { x, y });
                }
                board.rows[y] |= 1 << x;
            }
            index += 1;
        }

        Ok(board)
    }

    /// Grid rendering with `piece` overlaid as `#`.
    pub fn render_with_piece(&self, piece: &PieceState) -> String {
        let cells = piece.cells();
        let mut out = String::new();
        // writing into a String is infallible
        let _ = self.render_into(&mut out, |x, y| cells.contains(&(x, y)));
        out
    }

    fn render_into<W: Write, F: Fn(i8, i8) -> bool>(&self, out: &mut W, overlay: F) -> fmt::Result {
        for y in 0..self.depth() {
            for x in 0..self.width() {
                if x > 0 {
                    out.write_char(' ')?;
                }
                let (cx, cy) = (x as i8, y as i8);
                let c = if self.occupied(cx, cy) {
                    '*'
                } else if overlay(cx, cy) {
                    '#'
                } else if y < self.bar() {
                    ':'
                } else {
                    '.'
                };
                out.write_char(c)?;
            }
            out.write_char('\n')?;
        }
        writeln!(out, "{}", "-".repeat(self.width() * 2 - 1))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_into(f, |_, _| false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, Rotation};

    fn cfg() -> WellConfig {
        WellConfig::hatetris()
    }

    fn placed(outcome: PlaceOutcome) -> (Board, u32) {
        match outcome {
            PlaceOutcome::Placed { board, lines } => (board, lines),
            PlaceOutcome::GameOver => panic!("unexpected game over"),
        }
    }

    #[test]
    fn test_empty_board() {
        let b = Board::empty(&cfg());
        assert_eq!(b.depth(), 20);
        assert_eq!(b.height(), 0);
        assert!(!b.occupied(0, 19));
    }

    #[test]
    fn test_occupied_is_bounds_checked() {
        let b = Board::from_rows(&cfg(), &[0x3FF; 20]);
        assert!(b.occupied(9, 19));
        assert!(!b.occupied(-1, 5));
        assert!(!b.occupied(10, 5));
        assert!(!b.occupied(3, 20));
    }

    #[test]
    fn test_collision_walls_floor_and_cells() {
        let mut rows = [0u16; 20];
        rows[19] = 1 << 4;
        let b = Board::from_rows(&cfg(), &rows);
        assert!(!b.collision(&[(0, 5), (9, 18)]));
        assert!(b.collision(&[(-1, 5)]));
        assert!(b.collision(&[(10, 5)]));
        assert!(b.collision(&[(2, 20)]));
        assert!(b.collision(&[(4, 19)]));
    }

    #[test]
    fn test_place_in_buffer_is_game_over() {
        let b = Board::empty(&cfg());
        assert_eq!(b.place(&[(0, 3), (0, 4), (0, 5), (0, 6)]), PlaceOutcome::GameOver);
    }

    #[test]
    fn test_place_below_buffer_keeps_buffer_empty() {
        let b = Board::empty(&cfg());
        let (child, lines) = placed(b.place(&[(4, 18), (5, 18), (5, 19), (6, 19)]));
        assert_eq!(lines, 0);
        assert!((0..4).all(|y| child.is_row_empty(y)));
        assert!(child.occupied(5, 18));
        // parent untouched
        assert!(!b.occupied(5, 18));
    }

    #[test]
    fn test_single_gap_line_clear() {
        let mut rows = [0u16; 20];
        rows[19] = 0x3FF & !(1 << 7);
        rows[18] = 0b11;
        rows[17] = 0b1;
        let b = Board::from_rows(&cfg(), &rows);

        let (child, lines) = placed(b.place(&[(7, 19)]));
        assert_eq!(lines, 1);
        assert_eq!(child.row(19), 0b11);
        assert_eq!(child.row(18), 0b1);
        assert_eq!(child.row(0), 0);
        assert_eq!(child.height(), 2);
    }

    #[test]
    fn test_multiple_line_clear_retests_same_row() {
        let mut rows = [0u16; 20];
        rows[19] = 0x3FF & !1;
        rows[18] = 0x3FF & !1;
        rows[17] = 0b100;
        let b = Board::from_rows(&cfg(), &rows);

        let (child, lines) = placed(b.place(&[(0, 18), (0, 19)]));
        assert_eq!(lines, 2);
        assert_eq!(child.row(19), 0b100);
        assert!(child.rows()[..19].iter().all(|&r| r == 0));
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_place_on_occupied_cell_panics() {
        let mut rows = [0u16; 20];
        rows[19] = 1;
        let b = Board::from_rows(&cfg(), &rows);
        let _ = b.place(&[(0, 19)]);
    }

    #[test]
    fn test_height_counts_contiguous_rows_from_floor() {
        let mut rows = [0u16; 20];
        rows[19] = 1;
        rows[18] = 1;
        rows[16] = 1;
        assert_eq!(Board::from_rows(&cfg(), &rows).height(), 2);
        assert_eq!(Board::from_rows(&cfg(), &[1; 20]).height(), 20);
    }

    #[test]
    fn test_equality_ignores_history() {
        let b = Board::empty(&cfg());
        let (a, _) = placed(b.place(&[(0, 19)]));
        let (a, _) = placed(a.place(&[(1, 19)]));
        let (c, _) = placed(b.place(&[(1, 19)]));
        let (c, _) = placed(c.place(&[(0, 19)]));
        assert_eq!(a, c);
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        let mut rows = [0u16; 20];
        rows[19] = 0b1011;
        rows[10] = 1 << 9;
        let b = Board::from_rows(&cfg(), &rows);
        let text = b.to_string();
        assert!(text.starts_with(": : : : : : : : : :\n"));
        assert_eq!(Board::parse(&cfg(), &text), Ok(b));
    }

    #[test]
    fn test_parse_rejects_buffer_cells_and_overflow() {
        let mut text = String::from("*");
        text.push_str(&".".repeat(199));
        assert_eq!(
            Board::parse(&cfg(), &text),
            Err(BoardParseError::OccupiedBuffer { x: 0, y: 0 })
        );
        let text = ".".repeat(201);
        assert_eq!(
            Board::parse(&cfg(), &text),
            Err(BoardParseError::TooManyCells { capacity: 200 })
        );
    }

    #[test]
    fn test_check_buffer() {
        let mut rows = [0u16; 20];
        rows[19] = 0x3FF & !1;
        assert_eq!(Board::from_rows(&cfg(), &rows).check_buffer(), Ok(()));
        rows[2] = 0b1100;
        assert_eq!(
            Board::from_rows(&cfg(), &rows).check_buffer(),
            Err(BoardParseError::OccupiedBuffer { x: 2, y: 2 })
        );
    }

    #[test]
    fn test_render_with_piece() {
        let b = Board::empty(&cfg());
        let state = PieceState {
            piece: Piece::O,
            x: 0,
            y: 4,
            rotation: Rotation::North,
        };
        let text = b.render_with_piece(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], ". # # . . . . . . .");
        assert_eq!(lines[6], ". # # . . . . . . .");
        // piece cells count as empty when parsed back
        assert_eq!(Board::parse(&cfg(), &text), Ok(b));
    }
}
