/*
terrain.rs

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

//! Terrain, biome, and connection strength of the board tiles.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// Physical kind of a tile.
///
/// The terrain is set when the board is generated and never changes afterwards.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Display, FromRepr,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Terrain {
    Desert,
    Water,
    Volcano,
    Mountain,
    #[default]
    Plain,
}

impl Terrain {
    /// Return the terrain for the given character of an "ASCII art" map, or None if the character
    /// does not represent a tile.
    pub fn from_map_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(Terrain::Desert),
            'w' => Some(Terrain::Water),
            'v' => Some(Terrain::Volcano),
            'm' => Some(Terrain::Mountain),
            'p' => Some(Terrain::Plain),
            _ => None,
        }
    }

    /// Character used for the terrain in "ASCII art" maps.
    pub fn map_char(&self) -> char {
        match self {
            Terrain::Desert => 'D',
            Terrain::Water => 'W',
            Terrain::Volcano => 'V',
            Terrain::Mountain => 'M',
            Terrain::Plain => 'P',
        }
    }

    /// Biomes that the player can choose for a tile of this terrain.
    ///
    /// Desert tiles only offer caves when the puzzle allows it for that tile. Going back to
    /// [`Biome::None`] is always possible and is not part of the list.
    pub fn allowed_biomes(&self, cave_allowed: bool) -> Vec<Biome> {
        match self {
            Terrain::Plain => vec![Biome::Forest],
            Terrain::Water => vec![Biome::Glacier],
            Terrain::Desert => {
                if cave_allowed {
                    vec![Biome::Cave, Biome::Oasis]
                } else {
                    vec![Biome::Oasis]
                }
            }
            Terrain::Mountain => vec![Biome::Cave],
            Terrain::Volcano => Vec::new(),
        }
    }
}

/// Overlay that the player assigns to a tile.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    FromRepr,
    ValueEnum,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Biome {
    #[default]
    None,
    Forest,
    Cave,
    Glacier,
    Oasis,
}

impl Biome {
    /// Whether a biome is assigned.
    pub fn is_assigned(&self) -> bool {
        *self != Biome::None
    }
}

/// Quality of a tile connection, derived from the biome rules.
///
/// `Default` is the value before the first computation, and the value kept for terrain and biome
/// combinations that have no rule.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Strength {
    Strong,
    Weak,
    Bad,
    #[default]
    Default,
}

/// Presentation flag set on the tiles of the path during a puzzle check.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PathMark {
    /// Strong tile on the path.
    Safe,

    /// Weak tile on the path; the player can roll the dice for it.
    Fragile,
}
