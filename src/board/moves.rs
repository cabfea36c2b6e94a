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

use log::trace;

use super::material::{Color, Material, PieceType};
use super::square::{Coord, Offset};

use PieceType::*;

/// Up, down, right, left.
pub const CROSS: [Offset; 4] = [
    Offset::new(0, -1),
    Offset::new(0, 1),
    Offset::new(1, 0),
    Offset::new(-1, 0),
];

/// Up-left, up-right, down-right, down-left.
pub const DIAGONAL: [Offset; 4] = [
    Offset::new(-1, -1),
    Offset::new(1, -1),
    Offset::new(1, 1),
    Offset::new(-1, 1),
];

/// `CROSS` followed by `DIAGONAL`.
pub const ALL_LINES: [Offset; 8] = [
    CROSS[0], CROSS[1], CROSS[2], CROSS[3],
    DIAGONAL[0], DIAGONAL[1], DIAGONAL[2], DIAGONAL[3],
];

pub const KNIGHT_JUMPS: [Offset; 8] = [
    Offset::new(-2, -1),
    Offset::new(-1, -2),
    Offset::new(1, -2),
    Offset::new(2, -1),
    Offset::new(2, 1),
    Offset::new(1, 2),
    Offset::new(-1, 2),
    Offset::new(-2, 1),
];

/// Long enough to cross the whole board in any direction.
pub const FULL_DEPTH: usize = 8;

/// How a piece type moves: the directions it may travel and how many
/// squares it may travel along each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRule {
    pub offsets: &'static [Offset],
    pub depth: usize,
}

impl MoveRule {
    pub const KING: Self = Self::new(&ALL_LINES, 1);
    pub const QUEEN: Self = Self::new(&ALL_LINES, FULL_DEPTH);
    pub const ROOK: Self = Self::new(&CROSS, FULL_DEPTH);
    pub const BISHOP: Self = Self::new(&DIAGONAL, FULL_DEPTH);
    pub const KNIGHT: Self = Self::new(&KNIGHT_JUMPS, 1);

    pub const fn new(offsets: &'static [Offset], depth: usize) -> Self {
        Self { offsets, depth }
    }

    /// Rule for `kind`, or `None` for pawns. Pawn movement depends on
    /// color, captures only diagonally and has a double step, none of
    /// which fits a plain ray; it is left unmodeled rather than guessed.
    pub const fn for_piece(kind: PieceType) -> Option<Self> {
        match kind {
            King => Some(Self::KING),
            Queen => Some(Self::QUEEN),
            Rook => Some(Self::ROOK),
            Bishop => Some(Self::BISHOP),
            Knight => Some(Self::KNIGHT),
            Pawn => None,
        }
    }
}

/// Casts rays from `origin` for a piece of `color`.
///
/// Each offset is followed one step at a time, up to `rule.depth` steps.
/// Empty squares are destinations and the ray keeps going. An enemy piece
/// is a destination (a capture) and ends the ray. A friendly piece ends
/// the ray without being a destination. Leaving the board ends the ray.
///
/// The result is ordered by offset, then by distance from `origin`.
pub fn cast_rays<F>(origin: Coord, color: Color, rule: &MoveRule, occupant: F) -> Vec<Coord>
where
    F: Fn(Coord) -> Option<Color>,
{
    let mut destinations = Vec::new();
    for offset in rule.offsets {
        let mut current = origin;
        for _ in 0..rule.depth {
            let Some(next) = current + offset else {
                break;
            };
            match occupant(next) {
                None => destinations.push(next),
                Some(other) if other != color => {
                    destinations.push(next);
                    break;
                }
                Some(_) => break,
            }
            current = next;
        }
    }
    destinations
}

/// Read access to board occupancy, enough to generate moves.
pub trait Occupancy {
    fn occupant(&self, coord: Coord) -> Option<Material>;

    /// Destinations for whatever piece stands on `origin`. Empty when the
    /// square is empty or holds a pawn.
    fn destinations(&self, origin: Coord) -> Vec<Coord> {
        let Some(material) = self.occupant(origin) else {
            return Vec::new();
        };
        match MoveRule::for_piece(material.kind()) {
            Some(rule) => cast_rays(origin, material.color(), &rule, |coord| {
                self.occupant(coord).map(|m| m.color())
            }),
            None => {
                trace!("no move rule for {} at {}", material.kind(), origin);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    impl Occupancy for HashMap<Coord, Material> {
        fn occupant(&self, coord: Coord) -> Option<Material> {
            self.get(&coord).copied()
        }
    }

    fn coords(pairs: &[(isize, isize)]) -> Vec<Coord> {
        pairs.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    #[test]
    fn test_lone_king_in_the_middle() {
        let board = HashMap::from([(Coord::new(4, 4), Material::WK)]);
        let moves = board.destinations(Coord::new(4, 4));
        assert_eq!(
            moves,
            coords(&[(4, 3), (4, 5), (5, 4), (3, 4), (3, 3), (5, 3), (5, 5), (3, 5)])
        );
    }
    #[test]
    fn test_king_blocked_by_friend_captures_enemy() {
        let board = HashMap::from([
            (Coord::new(0, 0), Material::WK),
            (Coord::new(1, 0), Material::WP),
            (Coord::new(0, 1), Material::BP),
        ]);
        let moves = board.destinations(Coord::new(0, 0));
        assert_eq!(moves, coords(&[(0, 1), (1, 1)]));
    }
    #[test]
    fn test_rook_ray_stops_at_capture() {
        let board = HashMap::from([
            (Coord::new(0, 7), Material::WR),
            (Coord::new(0, 4), Material::BN),
            (Coord::new(3, 7), Material::WB),
        ]);
        let moves = board.destinations(Coord::new(0, 7));
        assert_eq!(moves, coords(&[(0, 6), (0, 5), (0, 4), (1, 7), (2, 7)]));
    }
    #[test]
    fn test_bishop_from_corner_crosses_board() {
        let board = HashMap::from([(Coord::new(0, 0), Material::BB)]);
        let moves = board.destinations(Coord::new(0, 0));
        assert_eq!(moves, (1..8).map(|i| Coord::new(i, i)).collect::<Vec<_>>());
    }
    #[test]
    fn test_queen_has_27_moves_in_the_middle_of_an_empty_board() {
        let board = HashMap::from([(Coord::new(3, 3), Material::WQ)]);
        assert_eq!(board.destinations(Coord::new(3, 3)).len(), 27);
    }
    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut board = HashMap::from([(Coord::new(1, 7), Material::WN)]);
        for x in 0..3 {
            board.insert(Coord::new(x, 6), Material::WP);
        }
        board.insert(Coord::new(2, 5), Material::BP);
        board.insert(Coord::new(3, 6), Material::WP);
        let moves = board.destinations(Coord::new(1, 7));
        assert_eq!(moves, coords(&[(0, 5), (2, 5)]));
    }
    #[test]
    fn test_pawn_has_no_rule() {
        let board = HashMap::from([(Coord::new(4, 6), Material::WP)]);
        assert!(board.destinations(Coord::new(4, 6)).is_empty());
        assert!(MoveRule::for_piece(PieceType::Pawn).is_none());
    }
    #[test]
    fn test_empty_origin_has_no_moves() {
        let board: HashMap<Coord, Material> = HashMap::new();
        assert!(board.destinations(Coord::new(4, 4)).is_empty());
    }
}
