// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Forsyth–Edwards Notation.
//!
//! Only the first two fields (piece placement and active color) are
//! modeled. Castling rights, the en-passant target and the move clocks
//! are accepted on input and discarded; on output they are always
//! written as `- - 0 1`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

use super::material::{Color, Material};
use super::square::Coord;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const EMPTY_FEN: &str = "8/8/8/8/8/8/8/8 w - - 0 1";

/// Written after the active color for the fields the board does not track.
pub const FEN_SUFFIX: &str = " - - 0 1";

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FenError {
    #[error("FEN is missing the piece placement field")]
    MissingPlacement,
    #[error("FEN is missing the active color field")]
    MissingActiveColor,
    #[error("Expecting 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("Rank {rank} spans {width} files (expecting 8)")]
    RankWidth { rank: usize, width: usize },
    #[error("Unrecognized symbol '{0}' in piece placement")]
    UnknownSymbol(char),
    #[error("Unrecognized active color '{0}' (expecting 'w' or 'b')")]
    UnknownActiveColor(String),
}

use FenError::*;

/// A fully validated board occupancy plus side to move.
///
/// Decoding always produces a complete `Layout` before anything touches a
/// board, so a malformed FEN never leaves a board half loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    squares: [Option<Material>; 64],
    turn: Color,
}

impl Layout {
    pub fn empty(turn: Color) -> Self {
        Self {
            squares: [None; 64],
            turn,
        }
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Occupied coordinates with their material, rank by rank from the top.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Material)> + '_ {
        Coord::all()
            .zip(self.squares.iter())
            .filter_map(|(coord, material)| material.map(|m| (coord, m)))
    }

    pub(super) fn set(&mut self, coord: Coord, material: Option<Material>) {
        if let Some(index) = coord.to_index() {
            self.squares[index] = material;
        }
    }

    /// Parses `text`, checking every field the board models.
    pub fn decode(text: &str) -> Result<Self> {
        let mut fields = text.split_whitespace();
        let placement = fields.next().ok_or(MissingPlacement)?;
        let active = fields.next().ok_or(MissingActiveColor)?;
        // Castling, en-passant and clocks are tolerated but not interpreted.

        let turn = Color::try_from_fen_token(active)
            .ok_or_else(|| UnknownActiveColor(active.to_string()))?;
        let mut layout = Self::empty(turn);

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(RankCount(ranks.len()).into());
        }
        for (rank, text) in ranks.into_iter().enumerate() {
            let mut file = 0usize;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(UnknownSymbol(c).into());
                    }
                    file += run as usize;
                } else {
                    let material = Material::try_from_fen_char(c).ok_or(UnknownSymbol(c))?;
                    if file < 8 {
                        layout.squares[rank * 8 + file] = Some(material);
                    }
                    file += 1;
                }
            }
            if file != 8 {
                return Err(RankWidth { rank, width: file }.into());
            }
        }
        Ok(layout)
    }
}

impl Index<Coord> for Layout {
    type Output = Option<Material>;

    fn index(&self, coord: Coord) -> &Self::Output {
        match coord.to_index() {
            Some(index) => &self.squares[index],
            None => &None,
        }
    }
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

/// Encodes the layout as a FEN string.
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, squares) in self.squares.chunks(8).enumerate() {
            if rank > 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for square in squares {
                match square {
                    Some(material) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", material.to_fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
        }
        write!(f, " {}{}", self.turn.to_fen_char(), FEN_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fen_error(text: &str) -> FenError {
        let err = Layout::decode(text).expect_err("FEN should be rejected");
        err.downcast_ref::<FenError>()
            .expect("error should be a FenError")
            .clone()
    }

    #[test]
    fn test_start_position() {
        let layout = Layout::decode(START_FEN).unwrap();
        assert_eq!(layout.turn(), Color::White);
        assert_eq!(layout.occupied().count(), 32);
        assert_eq!(layout[Coord::new(4, 0)], Some(Material::BK));
        assert_eq!(layout[Coord::new(3, 7)], Some(Material::WQ));
        assert_eq!(layout[Coord::new(0, 6)], Some(Material::WP));
        assert_eq!(layout[Coord::new(4, 4)], None);
        assert_eq!(layout.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");
    }
    #[test]
    fn test_empty_board() {
        let layout = Layout::decode(EMPTY_FEN).unwrap();
        assert_eq!(layout.occupied().count(), 0);
        assert_eq!(layout.to_string(), EMPTY_FEN);
    }
    #[test]
    fn test_black_to_move_and_runs_flush() {
        let text = "4k3/8/8/3pP3/8/8/8/R3K2R b KQ e3 0 23";
        let layout: Layout = text.parse().unwrap();
        assert_eq!(layout.turn(), Color::Black);
        assert_eq!(layout.to_string(), "4k3/8/8/3pP3/8/8/8/R3K2R b - - 0 1");
    }
    #[test]
    fn test_trailing_fields_are_optional() {
        let layout = Layout::decode("8/8/8/8/8/8/8/K7 b").unwrap();
        assert_eq!(layout.turn(), Color::Black);
        assert_eq!(layout[Coord::new(0, 7)], Some(Material::WK));
    }
    #[test]
    fn test_rejects_missing_fields() {
        assert_eq!(fen_error(""), MissingPlacement);
        assert_eq!(fen_error("   "), MissingPlacement);
        assert_eq!(fen_error("8/8/8/8/8/8/8/8"), MissingActiveColor);
    }
    #[test]
    fn test_rejects_wrong_rank_count() {
        assert_eq!(fen_error("8/8/8/8/8/8/8 w - - 0 1"), RankCount(7));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8/8 w - - 0 1"), RankCount(9));
    }
    #[test]
    fn test_rejects_bad_rank_width() {
        assert_eq!(fen_error("8/8/8/8/8/8/8/7 w"), RankWidth { rank: 7, width: 7 });
        assert_eq!(fen_error("8/8/ppppppppp/8/8/8/8/8 w"), RankWidth { rank: 2, width: 9 });
        assert_eq!(fen_error("44/8/8/8/8/8/8/54 w"), RankWidth { rank: 7, width: 9 });
        assert_eq!(fen_error("8/8/8/8/8/8/8/K8 w"), RankWidth { rank: 7, width: 9 });
    }
    #[test]
    fn test_rejects_unknown_symbols() {
        assert_eq!(fen_error("8/8/8/8/8/8/8/7x w"), UnknownSymbol('x'));
        assert_eq!(fen_error("8/8/8/8/8/8/8/08 w"), UnknownSymbol('0'));
        assert_eq!(fen_error("9/8/8/8/8/8/8/8 w"), UnknownSymbol('9'));
    }
    #[test]
    fn test_rejects_unknown_active_color() {
        assert_eq!(fen_error(&EMPTY_FEN.replace(" w ", " x ")), UnknownActiveColor("x".into()));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 W"), UnknownActiveColor("W".into()));
    }
}
