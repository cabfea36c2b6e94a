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

//! Chess board state
//!
//! A _board_ holds the contents of an 8-by-8 grid, whose turn it is and
//! which square (if any) the user has selected. It is meant to sit behind
//! a presentation layer (a window, a terminal, a position editor) which
//! renders it and forwards clicks. The following features are supported:
//!
//! [x] Load and generate FEN (placement and active color)
//! [x] Place and remove pieces freely (editor semantics)
//! [x] Click to select / deselect a piece
//! [x] Move destinations for kings, queens, rooks, bishops and knights
//! [ ] Pawn moves
//! [ ] Moving pieces by clicking a highlighted destination
//! [ ] Check, checkmate, castling, en passant
//!
//! Some of the key abstractions include:
//!
//! * A `Coord` is an `(x, y)` grid coordinate with `(0, 0)` at the top
//!   left (Black's queen-side rook in the standard setup). Any pair of
//!   integers can be held in a `Coord`; every board operation checks that
//!   it is on the board before using it.
//!
//! * A `Square` is a cell of the grid. There are exactly 64 of them,
//!   created with the board. A square owns at most one `Piece`.
//!
//! * `Material` is a `PieceType` (`King` .. `Pawn`) of a `Color`. A
//!   `Piece` is material standing on a square, together with whether it
//!   is selected and, if so, where it may move.
//!
//! * The `Board` keeps one set of occupied coordinates per color in step
//!   with the grid: a coordinate is in a color's set exactly when the
//!   square holds a piece of that color.
//!
//! * `Layout` is a validated snapshot of occupancy and turn, produced by
//!   FEN decoding and consumed by `Board::load_fen`.
//!

use anyhow::Result;
use log::{debug, trace};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod fen;
mod material;
mod moves;
mod piece;
mod play;
mod square;

pub use fen::*;
pub use material::*;
pub use moves::*;
pub use piece::*;
pub use play::*;
pub use square::*;

use Color::*;
use Selection::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Coordinate {0} is off the board (expecting 0..8 on both axes)")]
    OutOfBounds(Coord),
    #[error("Cannot select {0}: the square is empty")]
    EmptySquareSelection(Coord),
}

use BoardError::*;

static START_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    // Safety: START_FEN is a constant and is covered by tests
    Layout::decode(START_FEN).expect("START_FEN is well formed")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
    positions: Pair<BTreeSet<Coord>>,
    turn: Color,
    selection: Selection,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Board {
    /// An empty board with White to move.
    pub fn new() -> Self {
        Self {
            squares: std::array::from_fn(|index| Square::new(Coord::from_index(index))),
            positions: Pair::default(),
            turn: White,
            selection: Idle,
        }
    }

    /// A board set up in the standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.apply(&START_LAYOUT);
        board
    }

    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn square(&self, coord: Coord) -> Result<&Square> {
        let index = Self::check(coord)?;
        Ok(&self.squares[index])
    }

    /// Every square, rank by rank from the top.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    pub fn piece(&self, coord: Coord) -> Result<Option<&Piece>> {
        Ok(self.square(coord)?.piece())
    }

    /// Coordinates occupied by `color`.
    #[inline]
    pub fn positions(&self, color: Color) -> &BTreeSet<Coord> {
        &self.positions[color]
    }

    /// Every piece on the board, White's first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.positions
            .white()
            .iter()
            .chain(self.positions.black().iter())
            .filter_map(|coord| self.piece_at(*coord))
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_square(&self) -> Option<&Square> {
        let index = self.selection.coord()?.to_index()?;
        Some(&self.squares[index])
    }

    pub fn selected_piece(&self) -> Option<&Piece> {
        self.selected_square()?.piece()
    }

    /// Removes every piece, resets the turn to White and drops the
    /// selection.
    pub fn clear(&mut self) {
        for color in [White, Black] {
            for coord in std::mem::take(&mut self.positions[color]) {
                if let Some(index) = coord.to_index() {
                    self.squares[index].take();
                }
            }
        }
        self.turn = White;
        self.selection = Idle;
        debug!("board cleared");
    }

    /// Puts a new piece on `coord`, replacing whatever stood there. This
    /// is editor placement, not a move: the turn is neither checked nor
    /// changed.
    pub fn place_piece(&mut self, coord: Coord, kind: PieceType, color: Color) -> Result<()> {
        let index = Self::check(coord)?;
        self.put(index, Material::new(color, kind));
        trace!("placed {} {} at {}", color, kind, coord);
        self.refresh_selection(coord);
        Ok(())
    }

    /// Takes the piece off `coord`, if there is one.
    pub fn remove_piece(&mut self, coord: Coord) -> Result<Option<Piece>> {
        let index = Self::check(coord)?;
        let removed = self.squares[index].take();
        if let Some(piece) = &removed {
            self.positions[piece.color()].remove(&coord);
            trace!("removed {}", piece);
            self.refresh_selection(coord);
        }
        Ok(removed)
    }

    /// Selects the piece on `target`, or clears the selection for `None`.
    ///
    /// The previously selected piece (if any) is deselected first and the
    /// newly selected piece gets a fresh list of valid moves. Selecting an
    /// empty square is an error and leaves the board unchanged.
    pub fn select(&mut self, target: Option<Coord>) -> Result<()> {
        if let Some(coord) = target {
            let index = Self::check(coord)?;
            if !self.squares[index].has_piece() {
                return Err(EmptySquareSelection(coord).into());
            }
        }
        if let Selected(previous) = self.selection {
            if let Some(piece) = self.piece_at_mut(previous) {
                piece.deselect();
            }
        }
        self.selection = match target {
            None => Idle,
            Some(coord) => {
                let moves = self.destinations(coord);
                if let Some(piece) = self.piece_at_mut(coord) {
                    piece.select(moves);
                }
                Selected(coord)
            }
        };
        trace!("selection is now {:?}", self.selection);
        Ok(())
    }

    /// Selects the clicked piece, or deselects when the square is empty.
    pub fn handle_click(&mut self, coord: Coord) -> Result<Selection> {
        let index = Self::check(coord)?;
        let next = self
            .selection
            .on_click(coord, self.squares[index].has_piece());
        self.select(next.coord())?;
        Ok(next)
    }

    /// Destinations for the piece on `coord` without touching the
    /// selection. Empty for an empty square.
    pub fn valid_moves(&self, coord: Coord) -> Result<Vec<Coord>> {
        Self::check(coord)?;
        Ok(self.destinations(coord))
    }

    /// Replaces the whole board with the position described by `text`.
    /// Nothing changes if `text` is malformed.
    pub fn load_fen(&mut self, text: &str) -> Result<()> {
        let layout = Layout::decode(text).map_err(|err| {
            debug!("rejected FEN {:?}: {}", text, err);
            err
        })?;
        self.apply(&layout);
        Ok(())
    }

    pub fn generate_fen(&self) -> String {
        self.layout().to_string()
    }

    /// Snapshot of occupancy and turn.
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::empty(self.turn);
        for piece in self.pieces() {
            layout.set(piece.position(), Some(piece.material()));
        }
        layout
    }

    fn apply(&mut self, layout: &Layout) {
        self.clear();
        for (coord, material) in layout.occupied() {
            if let Some(index) = coord.to_index() {
                self.put(index, material);
            }
        }
        self.turn = layout.turn();
        debug!(
            "loaded {} white and {} black pieces, {} to move",
            self.positions[White].len(),
            self.positions[Black].len(),
            self.turn
        );
    }

    // Keeps the grid and the position sets in step. `index` must be the
    // index of a valid coordinate.
    fn put(&mut self, index: usize, material: Material) {
        let coord = Coord::from_index(index);
        let replaced = self.squares[index].replace(Piece::new(coord, material));
        if let Some(old) = replaced {
            self.positions[old.color()].remove(&coord);
        }
        self.positions[material.color()].insert(coord);
    }

    // Called after the occupant of `changed` was replaced or removed.
    fn refresh_selection(&mut self, changed: Coord) {
        match self.selection {
            Selected(selected) if selected == changed => {
                self.selection = Idle;
            }
            Selected(selected) => {
                let moves = self.destinations(selected);
                if let Some(piece) = self.piece_at_mut(selected) {
                    piece.set_valid_moves(moves);
                }
            }
            Idle => {}
        }
    }

    fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.squares[coord.to_index()?].piece()
    }

    fn piece_at_mut(&mut self, coord: Coord) -> Option<&mut Piece> {
        self.squares[coord.to_index()?].piece_mut()
    }

    fn check(coord: Coord) -> Result<usize> {
        coord.to_index().ok_or_else(|| {
            debug!("coordinate {} is off the board", coord);
            anyhow::Error::from(OutOfBounds(coord))
        })
    }
}

impl Occupancy for Board {
    fn occupant(&self, coord: Coord) -> Option<Material> {
        self.piece_at(coord).map(|piece| piece.material())
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut board = Self::new();
        board.load_fen(s)?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in self.squares.chunks(8) {
            for square in rank {
                write!(f, "{}", square)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Boards travel as FEN; the selection is not part of it.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.generate_fen())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
