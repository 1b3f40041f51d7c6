//! Piece types and their cell tables.
//!
//! Every shape lives inside a 4x4 box whose origin is the piece offset.
//! Orientation k+1 is orientation k turned clockwise inside that box:
//! a cell (x, y) moves to (3 - y, x).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    S,
    Z,
    O,
    I,
    L,
    J,
    T,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Base (North) cells per piece, in canonical order.
const BASE_CELLS: [[(i8, i8); 4]; 7] = [
    [(1, 2), (2, 1), (2, 2), (3, 1)], // S
    [(1, 1), (2, 1), (2, 2), (3, 2)], // Z
    [(1, 1), (1, 2), (2, 1), (2, 2)], // O
    [(0, 1), (1, 1), (2, 1), (3, 1)], // I
    [(1, 1), (1, 2), (2, 1), (3, 1)], // L
    [(1, 1), (1, 2), (1, 3), (2, 1)], // J
    [(1, 1), (2, 1), (2, 2), (3, 1)], // T
];

/// SHAPES[piece][rotation] — built once at compile time from BASE_CELLS.
const SHAPES: [[[(i8, i8); 4]; 4]; 7] = {
    let mut table = [[[(0i8, 0i8); 4]; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        let mut cells = BASE_CELLS[piece];
        let mut rot = 0;
        while rot < 4 {
            table[piece][rot] = cells;
            let mut i = 0;
            while i < 4 {
                let (x, y) = cells[i];
                cells[i] = (3 - y, x);
                i += 1;
            }
            rot += 1;
        }
        piece += 1;
    }
    table
};

impl Piece {
    /// Canonical enumeration order. The adversary breaks ties by it.
    pub const ALL: [Piece; 7] = [
        Piece::S,
        Piece::Z,
        Piece::O,
        Piece::I,
        Piece::L,
        Piece::J,
        Piece::T,
    ];

    /// Cell offsets inside the 4x4 box for the given rotation.
    #[inline(always)]
    pub fn cells(self, rot: Rotation) -> [(i8, i8); 4] {
        SHAPES[self as usize][rot.index()]
    }

    /// The square piece looks the same in every orientation.
    #[inline(always)]
    pub fn rotates(self) -> bool {
        self != Piece::O
    }

    pub fn letter(self) -> char {
        match self {
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::O => 'O',
            Piece::I => 'I',
            Piece::L => 'L',
            Piece::J => 'J',
            Piece::T => 'T',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
