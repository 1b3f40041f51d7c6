//! hatetris core crate - well geometry, boards, pieces, moves and traces.

mod board;
mod config;
mod moves;
mod piece;
pub mod trace;

pub use board::{Board, BoardParseError, PlaceOutcome, GAME_OVER_HEIGHT};
pub use config::{ConfigError, WellConfig};
pub use moves::{Move, PieceState};
pub use piece::{Piece, Rotation};
pub use trace::{Trace, TraceError};
