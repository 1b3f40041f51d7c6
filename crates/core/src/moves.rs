//! Atomic player moves and the in-flight piece pose.

use crate::{Piece, Rotation, WellConfig};
use serde::{Deserialize, Serialize};

/// One keypress. The discriminant order is the hex codec's digit order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Down,
    Rotate,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Down, Move::Rotate];

    pub fn letter(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Down => 'D',
            Move::Rotate => 'U',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            'D' => Some(Move::Down),
            'U' => Some(Move::Rotate),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub fn from_index(i: u8) -> Self {
        Self::ALL[(i & 3) as usize]
    }
}

/// Pose of the falling piece: box offset plus orientation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct PieceState {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl PieceState {
    pub fn spawn(piece: Piece, config: &WellConfig) -> Self {
        Self {
            piece,
            x: config.spawn_x(),
            y: 0,
            rotation: Rotation::North,
        }
    }

    /// Absolute (x, y) of the four cells.
    #[inline(always)]
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.piece
            .cells(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.cw(),
            ..self
        }
    }
}
