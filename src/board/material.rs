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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Index, IndexMut, Not};
use strum::IntoEnumIterator;
use strum_macros::Display;
use strum_macros::EnumIter;

/// The type and color of a piece, without any per-instance state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    kind: PieceType,
}

impl Material {
    pub const WK: Self = Self::new(White, King);
    pub const WQ: Self = Self::new(White, Queen);
    pub const WR: Self = Self::new(White, Rook);
    pub const WB: Self = Self::new(White, Bishop);
    pub const WN: Self = Self::new(White, Knight);
    pub const WP: Self = Self::new(White, Pawn);

    pub const BK: Self = Self::new(Black, King);
    pub const BQ: Self = Self::new(Black, Queen);
    pub const BR: Self = Self::new(Black, Rook);
    pub const BB: Self = Self::new(Black, Bishop);
    pub const BN: Self = Self::new(Black, Knight);
    pub const BP: Self = Self::new(Black, Pawn);

    #[inline]
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    /// FEN letter for this material: uppercase for White, lowercase for Black.
    pub fn to_fen_char(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            White => c.to_ascii_uppercase(),
            Black => c,
        }
    }

    /// Inverse of `to_fen_char`. Returns `None` for anything that is not
    /// one of `KQRBNPkqrbnp`.
    pub fn try_from_fen_char(c: char) -> Option<Self> {
        FEN_LETTERS.get(&c).copied()
    }
}

static FEN_LETTERS: Lazy<HashMap<char, Material>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for color in Color::iter() {
        for kind in PieceType::iter() {
            let material = Material::new(color, kind);
            map.insert(material.to_fen_char(), material);
        }
    }
    map
});

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Active-color token used in the second FEN field.
    pub const fn to_fen_char(&self) -> char {
        match self {
            White => 'w',
            Black => 'b',
        }
    }

    pub fn try_from_fen_token(token: &str) -> Option<Self> {
        match token {
            "w" => Some(White),
            "b" => Some(Black),
            _ => None,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

/// One value per color, indexable by `Color`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }

    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}
use PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};

impl PieceType {
    /// Lowercase FEN letter.
    pub const fn to_char(&self) -> char {
        match self {
            King => 'k',
            Queen => 'q',
            Rook => 'r',
            Bishop => 'b',
            Knight => 'n',
            Pawn => 'p',
        }
    }

    pub fn try_from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(King),
            'q' => Some(Queen),
            'r' => Some(Rook),
            'b' => Some(Bishop),
            'n' => Some(Knight),
            'p' => Some(Pawn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_letters_follow_case() {
        assert_eq!(Material::WK.to_fen_char(), 'K');
        assert_eq!(Material::BN.to_fen_char(), 'n');
        assert_eq!(Material::try_from_fen_char('Q'), Some(Material::WQ));
        assert_eq!(Material::try_from_fen_char('p'), Some(Material::BP));
        assert_eq!(Material::try_from_fen_char('x'), None);
        assert_eq!(Material::try_from_fen_char('3'), None);
    }
    #[test]
    fn test_every_material_has_a_unique_letter() {
        assert_eq!(FEN_LETTERS.len(), 12);
        for (c, material) in FEN_LETTERS.iter() {
            assert_eq!(material.to_fen_char(), *c);
        }
    }
    #[test]
    fn test_piece_type_names() {
        assert_eq!(King.to_string(), "king");
        assert_eq!(Knight.to_string(), "knight");
        assert_eq!(PieceType::try_from_char('B'), Some(Bishop));
    }
    #[test]
    fn test_active_color_tokens() {
        assert_eq!(Color::try_from_fen_token("w"), Some(White));
        assert_eq!(Color::try_from_fen_token("b"), Some(Black));
        assert_eq!(Color::try_from_fen_token("W"), None);
        assert_eq!(!White, Black);
    }
    #[test]
    fn test_pair_index_by_color() {
        let mut pair = Pair::new(1, 2);
        pair[Black] += 10;
        assert_eq!(pair[White], 1);
        assert_eq!(pair[Black], 12);
    }
}
