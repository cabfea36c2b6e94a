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

use serde::{Deserialize, Serialize};
use std::fmt;

use super::material::{Color, Material, PieceType};
use super::square::Coord;

/// A piece standing on the board.
///
/// The material never changes for the lifetime of a piece. The position
/// always equals the position of the square that owns it. `selected` and
/// `valid_moves` are transient: they are only populated while the piece
/// is the board's selection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Piece {
    material: Material,
    position: Coord,
    selected: bool,
    valid_moves: Vec<Coord>,
}

impl Piece {
    pub fn new(position: Coord, material: Material) -> Self {
        Self {
            material,
            position,
            selected: false,
            valid_moves: Vec::new(),
        }
    }

    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.material.kind()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.material.color()
    }

    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Destinations found by the last move generation, in offset order
    /// and then by distance along each ray.
    #[inline]
    pub fn valid_moves(&self) -> &[Coord] {
        &self.valid_moves
    }

    pub(super) fn select(&mut self, valid_moves: Vec<Coord>) {
        self.selected = true;
        self.valid_moves = valid_moves;
    }

    pub(super) fn deselect(&mut self) {
        self.selected = false;
        self.valid_moves.clear();
    }

    pub(super) fn set_valid_moves(&mut self, valid_moves: Vec<Coord>) {
        self.valid_moves = valid_moves;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.color(), self.kind(), self.position)
    }
}
