/*
medium_dunes.rs

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

//! Dunes puzzle, medium level.
//!
//! ```text
//! M D D D D M
//!  P W P P W P
//! ```
//!
//! The desert tile in the middle has no water nearby and can only host a cave.

use super::{Difficulty, Preset, PuzzleDefinition};
use crate::board::terrain::Biome;
use crate::board::tile::TileId;

/// Return the puzzle definition.
pub fn get() -> PuzzleDefinition {
    PuzzleDefinition {
        name: String::from("Dunes"),
        difficulty: Difficulty::Medium,
        map: vec![String::from("MDDDDM"), String::from("PWPPWP")],
        start: TileId::new(0, 0),
        end: TileId::new(5, 0),
        presets: vec![
            Preset {
                x: 0,
                y: 0,
                biome: Biome::Cave,
            },
            Preset {
                x: 5,
                y: 0,
                biome: Biome::Cave,
            },
        ],
        cave_tiles: vec![TileId::new(3, 0)],
    }
}
