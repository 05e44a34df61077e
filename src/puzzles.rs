/*
puzzles.rs

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

//! Puzzle definitions.
//!
//! A puzzle is a terrain map, a start and an end tile, and some preset tiles that the player
//! cannot change. Puzzles are either built in (see [`puzzle_map`]) or loaded from a JSON file:
//!
//! ```json
//! {
//!   "name": "Crossing",
//!   "difficulty": "easy",
//!   "map": ["WWWWW", "MPPPM"],
//!   "start": { "x": 0, "y": 1 },
//!   "end": { "x": 4, "y": 1 },
//!   "presets": [
//!     { "x": 0, "y": 1, "biome": "cave" },
//!     { "x": 4, "y": 1, "biome": "cave" }
//!   ],
//!   "cave_tiles": []
//! }
//! ```

// For developers: add you new puzzle to this list of modules.
pub mod easy_crossing;
pub mod hard_crossing;
pub mod medium_dunes;

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use strum_macros::FromRepr;

use crate::board::layout::{HexLayout, ParseError};
use crate::board::terrain::Biome;
use crate::board::tile::{Tile, TileId};
use crate::board::{Board, BoardError};
use crate::presenter::{PanelPresenter, TileRenderer};
use crate::session::PuzzleSession;

/// Puzzle difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Errors raised when loading or building a puzzle.
#[derive(Debug)]
pub enum PuzzleError {
    Io(io::Error),
    Json(serde_json::Error),
    Map(ParseError),
    Board(BoardError),

    /// The definition is inconsistent (missing start tile, preset outside the map, ...).
    Validation(String),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleError::Io(err) => write!(f, "cannot read the puzzle file: {err}"),
            PuzzleError::Json(err) => write!(f, "invalid puzzle file: {err}"),
            PuzzleError::Map(err) => write!(f, "invalid puzzle map: {err}"),
            PuzzleError::Board(err) => write!(f, "cannot build the puzzle board: {err}"),
            PuzzleError::Validation(msg) => write!(f, "invalid puzzle: {msg}"),
        }
    }
}

impl Error for PuzzleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PuzzleError::Io(err) => Some(err),
            PuzzleError::Json(err) => Some(err),
            PuzzleError::Map(err) => Some(err),
            PuzzleError::Board(err) => Some(err),
            PuzzleError::Validation(_) => None,
        }
    }
}

impl From<io::Error> for PuzzleError {
    fn from(value: io::Error) -> Self {
        PuzzleError::Io(value)
    }
}

impl From<serde_json::Error> for PuzzleError {
    fn from(value: serde_json::Error) -> Self {
        PuzzleError::Json(value)
    }
}

impl From<ParseError> for PuzzleError {
    fn from(value: ParseError) -> Self {
        PuzzleError::Map(value)
    }
}

impl From<BoardError> for PuzzleError {
    fn from(value: BoardError) -> Self {
        PuzzleError::Board(value)
    }
}

/// Tile with a biome set by the puzzle. The player cannot change it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preset {
    pub x: i32,
    pub y: i32,
    pub biome: Biome,
}

/// Puzzle definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleDefinition {
    /// Puzzle name.
    pub name: String,

    /// Difficulty level.
    pub difficulty: Difficulty,

    /// Terrain map, one string per row. See [`crate::board::layout`] for the format.
    pub map: Vec<String>,

    /// The path must connect these two tiles.
    pub start: TileId,
    pub end: TileId,

    #[serde(default)]
    pub presets: Vec<Preset>,

    /// Desert tiles for which the biome menu offers caves.
    #[serde(default)]
    pub cave_tiles: Vec<TileId>,
}

impl PuzzleDefinition {
    /// Read a puzzle definition from a JSON file.
    ///
    /// # Errors
    ///
    /// The method returns an error when the file cannot be read, is not valid JSON, or describes
    /// an inconsistent puzzle.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleError> {
        debug!("Loading puzzle file {:?}", path.as_ref());
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let definition: PuzzleDefinition = serde_json::from_reader(reader)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Parse the terrain map.
    fn tiles(&self, layout: &HexLayout) -> Result<Vec<Tile>, PuzzleError> {
        Ok(layout.parse_map(&self.map.join("\n"))?)
    }

    /// Verify that the tiles that the definition refers to exist in the map.
    ///
    /// # Errors
    ///
    /// The method returns an error when the map is invalid or when a referenced tile is not in the
    /// map.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let tiles: Vec<Tile> = self.tiles(&HexLayout::default())?;
        let ids: HashSet<TileId> = tiles.iter().map(|t| t.id()).collect();

        if !ids.contains(&self.start) {
            return Err(PuzzleError::Validation(format!(
                "start tile {} is not in the map",
                self.start
            )));
        }
        if !ids.contains(&self.end) {
            return Err(PuzzleError::Validation(format!(
                "end tile {} is not in the map",
                self.end
            )));
        }
        for p in &self.presets {
            let id: TileId = TileId::new(p.x, p.y);
            if !ids.contains(&id) {
                return Err(PuzzleError::Validation(format!(
                    "preset tile {id} is not in the map"
                )));
            }
        }
        if let Some(id) = self.cave_tiles.iter().find(|id| !ids.contains(id)) {
            return Err(PuzzleError::Validation(format!(
                "cave tile {id} is not in the map"
            )));
        }
        Ok(())
    }

    /// Build the board of the puzzle and start a session.
    ///
    /// The preset tiles are locked and receive their biome before the session starts.
    ///
    /// # Errors
    ///
    /// The method returns an error when the definition is not valid.
    pub fn build_session<R: TileRenderer, P: PanelPresenter>(
        &self,
        layout: &HexLayout,
        renderer: R,
        panel: P,
    ) -> Result<PuzzleSession<R, P>, PuzzleError> {
        self.validate()?;

        let locked: HashSet<TileId> = self.presets.iter().map(|p| TileId::new(p.x, p.y)).collect();
        let tiles: Vec<Tile> = self
            .tiles(layout)?
            .into_iter()
            .map(|t| {
                let t: Tile = if locked.contains(&t.id()) {
                    t.locked()
                } else {
                    t
                };
                if self.cave_tiles.contains(&t.id()) {
                    t.with_cave_allowed()
                } else {
                    t
                }
            })
            .collect();

        let mut board: Board<R> = Board::with_renderer(tiles, renderer);
        board.build_graph(layout.neighbor_radius())?;
        for p in &self.presets {
            board.set_biome(TileId::new(p.x, p.y), p.biome)?;
        }

        info!(
            "Puzzle {} {}: {} tiles, from {} to {}",
            self.name,
            self.difficulty,
            board.tiles().len(),
            self.start,
            self.end
        );
        Ok(PuzzleSession::new(board, self.start, self.end, panel))
    }
}

/// Return the built-in puzzles, by name and difficulty.
pub fn puzzle_map() -> HashMap<(String, Difficulty), PuzzleDefinition> {
    let mut puzzles: HashMap<(String, Difficulty), PuzzleDefinition> = HashMap::new();

    // For developers: add your new puzzle to the list.
    let p: PuzzleDefinition = easy_crossing::get();
    puzzles.insert((String::from(&p.name), p.difficulty), p);

    let p: PuzzleDefinition = medium_dunes::get();
    puzzles.insert((String::from(&p.name), p.difficulty), p);

    let p: PuzzleDefinition = hard_crossing::get();
    puzzles.insert((String::from(&p.name), p.difficulty), p);

    puzzles
}
