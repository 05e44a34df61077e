/*
easy_crossing.rs

Copyright 2025 The Hexbiome authors

This file is part of Hexbiome.

Hexbiome is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hexbiome is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hexbiome. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Crossing puzzle, easy level.
//!
//! A row of plains between two mountains, along a river.
//!
//! ```text
//! W W W W W
//!  M P P P M
//! ```

use super::{Difficulty, Preset, PuzzleDefinition};
use crate::board::terrain::Biome;
use crate::board::tile::TileId;

/// Return the puzzle definition.
pub fn get() -> PuzzleDefinition {
    PuzzleDefinition {
        name: String::from("Crossing"),
        difficulty: Difficulty::Easy,
        map: vec![String::from("WWWWW"), String::from("MPPPM")],
        start: TileId::new(0, 1),
        end: TileId::new(4, 1),
        presets: vec![
            Preset {
                x: 0,
                y: 1,
                biome: Biome::Cave,
            },
            Preset {
                x: 4,
                y: 1,
                biome: Biome::Cave,
            },
        ],
        cave_tiles: Vec::new(),
    }
}
