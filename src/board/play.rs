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

use super::square::Coord;

/// What the user currently has selected.
///
/// Clicking an occupied square always selects it, even if it is already
/// selected. Clicking an empty square always returns to `Idle`. Clicks
/// never move pieces.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(Coord),
}

use Selection::*;

impl Selection {
    #[inline]
    pub fn coord(&self) -> Option<Coord> {
        match self {
            Idle => None,
            Selected(coord) => Some(*coord),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Idle)
    }

    /// The state after clicking `clicked`.
    pub fn on_click(self, clicked: Coord, occupied: bool) -> Self {
        if occupied {
            Selected(clicked)
        } else {
            Idle
        }
    }
}
