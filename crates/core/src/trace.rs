//! Move traces and the hex trace codec.
//!
//! A hex digit `d` stands for the move pair `(ALL[d / 4], ALL[d % 4])`.
//! Encoded output is grouped four digits at a time.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Move;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("invalid character {ch:?} at offset {offset} in encoded trace")]
    InvalidCharacter { ch: char, offset: usize },
    #[error("invalid move letter {ch:?} at offset {offset}")]
    InvalidLetter { ch: char, offset: usize },
}

/// Decode a hex trace. Whitespace is skipped; only `0-9` and `A-F` are
/// digits.
pub fn decode(encoded: &str) -> Result<Vec<Move>, TraceError> {
    let mut moves = Vec::with_capacity(encoded.len() * 2);
    for (offset, ch) in encoded.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let digit = match ch {
            '0'..='9' | 'A'..='F' => ch.to_digit(16).unwrap_or_default() as u8,
            _ => return Err(TraceError::InvalidCharacter { ch, offset }),
        };
        moves.push(Move::from_index(digit / 4));
        moves.push(Move::from_index(digit % 4));
    }
    Ok(moves)
}

/// Encode moves two per hex digit. An odd-length trace gets one trailing
/// `Down` as padding.
pub fn encode(moves: &[Move]) -> String {
    let digits: Vec<char> = moves
        .chunks(2)
        .map(|pair| {
            let hi = pair[0].index();
            let lo = pair.get(1).copied().unwrap_or(Move::Down).index();
            char::from_digit((hi * 4 + lo) as u32, 16)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();

    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, group) in digits.chunks(4).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.extend(group);
    }
    out
}

/// Parse a letter trace (`L`, `R`, `D`, `U`), skipping whitespace.
pub fn parse_letters(text: &str) -> Result<Vec<Move>, TraceError> {
    text.char_indices()
        .filter(|(_, ch)| !ch.is_ascii_whitespace())
        .map(|(offset, ch)| Move::from_letter(ch).ok_or(TraceError::InvalidLetter { ch, offset }))
        .collect()
}

/// A full trace, kept as one segment per locked piece.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    segments: Vec<Vec<Move>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Vec<Move>>) -> Self {
        Self { segments }
    }

    pub fn push_segment(&mut self, segment: Vec<Move>) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Vec<Move>] {
        &self.segments
    }

    /// Number of locked pieces.
    pub fn pieces(&self) -> usize {
        self.segments.len()
    }

    pub fn moves(&self) -> Vec<Move> {
        self.segments.iter().flatten().copied().collect()
    }

    pub fn encode(&self) -> String {
        encode(&self.moves())
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for mv in segment {
                write!(f, "{}", mv.letter())?;
            }
        }
        Ok(())
    }
}
