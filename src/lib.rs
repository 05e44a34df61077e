/*
lib.rs

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

//! Hex tile puzzle where the player connects two tiles with biomes.
//!
//! Each tile has a terrain and can receive a biome. Forests and oases draw on nearby water tiles,
//! caves prefer frozen water, and glaciers melt next to deserts. The [`board::Board`] derives the
//! strength of every tile from these rules, and the [`session::PuzzleSession`] checks whether a
//! path of biomes connects the start and the end tiles.

pub mod board;
pub mod presenter;
pub mod puzzles;
pub mod session;

pub use board::terrain::{Biome, PathMark, Strength, Terrain};
pub use board::tile::{Tile, TileId};
pub use board::{Board, BoardError};
pub use session::{DiceOutcome, PuzzleSession, SessionError, Verdict};
