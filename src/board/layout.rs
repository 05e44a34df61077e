/*
layout.rs

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

//! Hex grid layout and "ASCII art" terrain maps.
//!
//! Tiles use a pointy-top layout: odd rows are shifted to the right by half a tile, and rows are
//! three quarters of a tile apart. With that layout, the six neighbors of a tile are at distance
//! `tile_size` (same row) or about `0.90 * tile_size` (rows above and below), and the next tiles
//! are at least `1.5 * tile_size` away. Any radius between these two bounds finds the six
//! neighbors.
//!
//! A map is a list of rows, one character per column:
//!
//! ```text
//! PPWDD
//! P.WMD
//! PPWDD
//! ```
//!
//! - `D` desert, `W` water, `V` volcano, `M` mountain, `P` plain (case-insensitive).
//! - `.` or a space is a hole in the grid (no tile).
//! - Empty lines are ignored.

use log::{Level, debug, log_enabled};
use std::error::Error;
use std::fmt;

use super::terrain::Terrain;
use super::tile::{Tile, TileId};

/// Fraction of the tile size used as the neighbor detection radius.
pub const NEIGHBOR_RADIUS_FACTOR: f64 = 1.2;

/// Error raised when a map contains an unknown character.
#[derive(Debug, PartialEq)]
pub struct ParseError {
    /// Row of the character, starting at 0 (empty lines are not counted).
    pub row: usize,

    /// Column of the character, starting at 0.
    pub column: usize,

    /// The offending character.
    pub character: char,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unknown terrain '{}' at row {}, column {}",
            self.character, self.row, self.column
        )
    }
}

impl Error for ParseError {}

/// Pointy-top hex layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HexLayout {
    /// Distance between the centers of two tiles in the same row.
    pub tile_size: f64,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl HexLayout {
    /// Create a [`HexLayout`] object.
    pub fn new(tile_size: f64) -> Self {
        Self { tile_size }
    }

    /// Return the world position of the center of the tile at the given grid coordinates.
    pub fn world_position(&self, id: TileId) -> (f64, f64) {
        let shift: f64 = if id.y.rem_euclid(2) == 1 {
            self.tile_size * 0.5
        } else {
            0.0
        };
        (
            id.x as f64 * self.tile_size + shift,
            id.y as f64 * self.tile_size * 0.75,
        )
    }

    /// Radius under which two tiles are neighbors.
    pub fn neighbor_radius(&self) -> f64 {
        self.tile_size * NEIGHBOR_RADIUS_FACTOR
    }

    /// Create a tile at the given grid coordinates.
    pub fn tile(&self, x: i32, y: i32, terrain: Terrain) -> Tile {
        let id: TileId = TileId::new(x, y);
        Tile::new(id, terrain, self.world_position(id))
    }

    /// Convert an "ASCII art" map into tiles, in row-major order.
    ///
    /// # Errors
    ///
    /// The method returns an error for the first character that is not a terrain or a hole.
    pub fn parse_map(&self, map: &str) -> Result<Vec<Tile>, ParseError> {
        let mut tiles: Vec<Tile> = Vec::new();
        let mut y: usize = 0;

        for row in map.lines() {
            let r: &str = row.trim_end();
            if r.is_empty() {
                continue;
            }
            for (x, c) in r.chars().enumerate() {
                if c == '.' || c == ' ' {
                    continue;
                }
                match Terrain::from_map_char(c) {
                    Some(terrain) => tiles.push(self.tile(x as i32, y as i32, terrain)),
                    None => {
                        return Err(ParseError {
                            row: y,
                            column: x,
                            character: c,
                        });
                    }
                }
            }
            y += 1;
        }

        if log_enabled!(Level::Debug) {
            debug!("Number of tiles: {}", tiles.len());
            debug!("         height: {y}");
        }
        Ok(tiles)
    }
}
