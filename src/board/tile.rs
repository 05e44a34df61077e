/*
tile.rs

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

//! Tiles of the board.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::terrain::{Biome, PathMark, Strength, Terrain};

/// Grid coordinate of a tile, which is also its identity.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    pub x: i32,
    pub y: i32,
}

impl TileId {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A node of the board.
///
/// The terrain is fixed at creation. The biome is what the player assigns, and the strength is
/// derived by the rule engine each time the tile or its surroundings change. Tiles do not own
/// their neighbors: the [`crate::board::graph::AdjacencyGraph`] stores the relation.
#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    terrain: Terrain,

    /// Center of the tile in world units, used to discover the neighbors.
    position: (f64, f64),

    pub(crate) biome: Biome,
    pub(crate) strength: Strength,

    /// Index of the water tile this tile claims as support.
    pub(crate) claim: Option<usize>,

    /// Set by the last puzzle check.
    pub(crate) mark: Option<PathMark>,

    /// Whether the player can change the biome. Preset tiles are locked.
    clickable: bool,

    /// Whether the biome menu offers caves on this (desert) tile.
    cave_allowed: bool,
}

impl Tile {
    /// Create a [`Tile`] object with no biome and no computed strength.
    pub fn new(id: TileId, terrain: Terrain, position: (f64, f64)) -> Self {
        Self {
            id,
            terrain,
            position,
            biome: Biome::None,
            strength: Strength::Default,
            claim: None,
            mark: None,
            clickable: true,
            cave_allowed: false,
        }
    }

    /// Lock the tile so that the player cannot change it.
    pub fn locked(mut self) -> Self {
        self.clickable = false;
        self
    }

    /// Allow caves in the biome menu of the tile.
    pub fn with_cave_allowed(mut self) -> Self {
        self.cave_allowed = true;
        self
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    /// Return the last computed strength. Reading the strength never triggers a computation.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn mark(&self) -> Option<PathMark> {
        self.mark
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    /// Biomes that the biome menu offers for this tile.
    pub fn allowed_biomes(&self) -> Vec<Biome> {
        self.terrain.allowed_biomes(self.cave_allowed)
    }

    /// Euclidean distance between the centers of two tiles.
    pub fn distance(&self, other: &Tile) -> f64 {
        let dx: f64 = self.position.0 - other.position.0;
        let dy: f64 = self.position.1 - other.position.1;
        (dx * dx + dy * dy).sqrt()
    }
}
