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
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use super::material::{Color, Pair};
use super::piece::Piece;

use Color::*;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: isize = 8;

/// A grid coordinate. `x` is the file (0 = left) and `y` the rank as
/// seen from the top of the board (0 = Black's back rank).
///
/// A `Coord` may hold any pair of integers so that callers can hand the
/// board whatever the presentation layer produced; it only addresses a
/// square when `is_valid()` holds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: isize,
    pub y: isize,
}

impl Coord {
    #[inline]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        0 <= self.x && self.x < BOARD_SIZE && 0 <= self.y && self.y < BOARD_SIZE
    }

    /// Index into a row-major 64 element grid, or `None` when off the board.
    #[inline]
    pub const fn to_index(&self) -> Option<usize> {
        if self.is_valid() {
            Some((self.y * BOARD_SIZE + self.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        let index = index as isize;
        Self::new(index % BOARD_SIZE, index / BOARD_SIZE)
    }

    /// Light squares are those where `x + y` is even.
    #[inline]
    pub const fn shade(&self) -> Color {
        if (self.x ^ self.y) & 1 == 0 {
            White
        } else {
            Black
        }
    }

    /// All 64 on-board coordinates, rank by rank from the top.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64).map(Self::from_index)
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(isize, isize)> for Coord {
    fn from((x, y): (isize, isize)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Coord {
    type Output = Option<Coord>;
    fn add(self, rhs: Offset) -> Self::Output {
        let coord = Coord::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?);
        coord.is_valid().then_some(coord)
    }
}
impl Add<&Offset> for Coord {
    type Output = Option<Coord>;
    fn add(self, rhs: &Offset) -> Self::Output {
        self + *rhs
    }
}

/// A single cell of the board. Squares are created once with the board
/// and never move; only the piece they hold changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    position: Coord,
    piece: Option<Piece>,
    // Per-color attack counters. Always zero for now; nothing computes
    // attacks yet (check detection is not modeled).
    attacks: Pair<u8>,
}

impl Square {
    pub(super) fn new(position: Coord) -> Self {
        debug_assert!(position.is_valid());
        Self {
            position,
            piece: None,
            attacks: Pair::default(),
        }
    }

    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    #[inline]
    pub fn shade(&self) -> Color {
        self.position.shade()
    }

    #[inline]
    pub fn has_piece(&self) -> bool {
        self.piece.is_some()
    }

    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[inline]
    pub(super) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    #[inline]
    pub fn attacks(&self, color: Color) -> u8 {
        self.attacks[color]
    }

    /// Puts `piece` on this square, returning whatever was there before.
    pub(super) fn replace(&mut self, piece: Piece) -> Option<Piece> {
        debug_assert_eq!(piece.position(), self.position);
        self.piece.replace(piece)
    }

    pub(super) fn take(&mut self) -> Option<Piece> {
        self.piece.take()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.piece {
            Some(piece) => write!(f, "{}", piece.material().to_fen_char()),
            None => write!(f, "."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;

    #[test]
    fn test_bounds() {
        assert!(Coord::new(0, 0).is_valid());
        assert!(Coord::new(7, 7).is_valid());
        assert!(!Coord::new(8, 0).is_valid());
        assert!(!Coord::new(0, -1).is_valid());
        assert_eq!(Coord::new(8, 0).to_index(), None);
        assert_eq!(Coord::new(3, 2).to_index(), Some(19));
        assert_eq!(Coord::from_index(19), Coord::new(3, 2));
        assert_eq!(Coord::from((3, 2)), Coord::new(3, 2));
    }
    #[test]
    fn test_add_offset_stays_on_board() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner + Offset::new(1, 1), Some(Coord::new(1, 1)));
        assert_eq!(corner + Offset::new(-1, 0), None);
        assert_eq!(Coord::new(7, 3) + Offset::new(1, 0), None);
    }
    #[test]
    fn test_add_offset_near_integer_limits() {
        assert_eq!(Coord::new(isize::MAX, 0) + Offset::new(1, 0), None);
        assert_eq!(Coord::new(0, isize::MIN) + Offset::new(0, -1), None);
        assert_eq!(Coord::new(isize::MIN, isize::MAX) + Offset::new(-2, 1), None);
        assert_eq!(Coord::new(isize::MAX, 0) + Offset::new(isize::MIN, 0), None);
    }
    #[test]
    fn test_shade_alternates() {
        assert_eq!(Coord::new(0, 0).shade(), White);
        assert_eq!(Coord::new(1, 0).shade(), Black);
        assert_eq!(Coord::new(1, 1).shade(), White);
        assert_eq!(Coord::new(7, 0).shade(), Black);
        assert_eq!(Coord::new(isize::MAX, isize::MAX).shade(), White);
        assert_eq!(Coord::new(-1, 0).shade(), Black);
    }
    #[test]
    fn test_coords_order_rank_first() {
        let mut coords: Vec<Coord> = vec![Coord::new(0, 1), Coord::new(5, 0), Coord::new(2, 0)];
        coords.sort();
        assert_eq!(coords, vec![Coord::new(2, 0), Coord::new(5, 0), Coord::new(0, 1)]);
        assert_eq!(Coord::all().count(), 64);
        assert!(Coord::all().all(|c| c.is_valid()));
    }
    #[test]
    fn test_square_holds_one_piece() {
        let position = Coord::new(2, 5);
        let mut square = Square::new(position);
        assert!(!square.has_piece());
        assert_eq!(square.attacks(White), 0);
        assert_eq!(square.attacks(Black), 0);

        assert!(square.replace(Piece::new(position, Material::WQ)).is_none());
        let old = square.replace(Piece::new(position, Material::BN));
        assert_eq!(old.map(|p| p.material()), Some(Material::WQ));
        assert_eq!(square.to_string(), "n");

        assert!(square.take().is_some());
        assert!(!square.has_piece());
        assert_eq!(square.to_string(), ".");
    }
}
