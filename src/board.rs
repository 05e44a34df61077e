/*
board.rs

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

//! Board of hex tiles and the biome rule engine.
//!
//! A [`Board`] owns the [`tile::Tile`] objects, the [`graph::AdjacencyGraph`] that links them, and
//! one [`support::WaterSupport`] claim tracker per tile.
//!
//! Before biomes can be assigned, the neighbor relation must be built with
//! [`Board::build_graph`]. The radius is usually [`layout::HexLayout::neighbor_radius`].
//!
//! Each time the player assigns or clears a biome, the board:
//!
//! * releases the water claim that the tile held, if any,
//! * chooses a new water tile to claim with [`rules::select_water`],
//! * recomputes with [`rules::evaluate`] the strength of the tile, of its neighbors, and of all
//!   the tiles that claim a water tile whose claims changed,
//! * reports each recomputed tile to the [`TileRenderer`].
//!
//! The path between two tiles is computed by [`path::find_path`].

pub mod graph;
pub mod layout;
pub mod path;
pub mod rules;
pub mod support;
pub mod terrain;
pub mod tile;

use log::{Level, debug, log_enabled, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::presenter::{NoPresenter, TileRenderer};
use graph::AdjacencyGraph;
use path::Path;
use rules::Rule;
use support::{DependentKind, WaterSupport};
use terrain::{Biome, PathMark, Strength};
use tile::{Tile, TileId};

/// Errors raised by the board operations.
#[derive(Debug, PartialEq)]
pub enum BoardError {
    /// No tile with that identifier on the board.
    UnknownTile(TileId),

    /// The operation needs the neighbor relation, which has not been built yet.
    GraphNotBuilt,

    /// The neighbor radius is negative or not a number.
    InvalidRadius(f64),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::UnknownTile(id) => write!(f, "no tile at {id}"),
            BoardError::GraphNotBuilt => write!(f, "the adjacency graph has not been built"),
            BoardError::InvalidRadius(r) => write!(f, "invalid neighbor radius {r}"),
        }
    }
}

impl Error for BoardError {}

/// Board of tiles.
#[derive(Debug)]
pub struct Board<R: TileRenderer = NoPresenter> {
    tiles: Vec<Tile>,

    /// Tile index for each tile identifier.
    index: HashMap<TileId, usize>,

    /// Neighbor relation. None until [`Board::build_graph`] is called.
    graph: Option<AdjacencyGraph>,

    /// Support claims, indexed like [`Board::tiles`]. Only water tiles receive claims.
    supports: Vec<WaterSupport>,

    renderer: R,
}

impl Board<NoPresenter> {
    /// Create a [`Board`] object that does not report visual changes.
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self::with_renderer(tiles, NoPresenter)
    }
}

impl<R: TileRenderer> Board<R> {
    /// Create a [`Board`] object that reports visual changes to the given renderer.
    ///
    /// When several tiles share the same identifier, only the last one can be addressed.
    pub fn with_renderer(tiles: Vec<Tile>, renderer: R) -> Self {
        let mut index: HashMap<TileId, usize> = HashMap::with_capacity(tiles.len());
        for (i, t) in tiles.iter().enumerate() {
            if index.insert(t.id(), i).is_some() {
                warn!("Duplicated tile {}", t.id());
            }
        }
        let supports: Vec<WaterSupport> = vec![WaterSupport::default(); tiles.len()];
        Self {
            tiles,
            index,
            graph: None,
            supports,
            renderer,
        }
    }

    /// Build the neighbor relation and compute the initial strength of every tile.
    ///
    /// Calling the method again keeps the existing edges and only adds the missing ones.
    ///
    /// # Errors
    ///
    /// The method returns an error when the radius is negative or not a number.
    pub fn build_graph(&mut self, radius: f64) -> Result<(), BoardError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(BoardError::InvalidRadius(radius));
        }

        let mut graph: AdjacencyGraph = self.graph.take().unwrap_or_default();
        graph.connect_within(&self.tiles, radius);
        if log_enabled!(Level::Debug) {
            graph.debug(&self.tiles);
        }
        self.graph = Some(graph);
        self.refresh()
    }

    /// Whether [`Board::build_graph`] has been called.
    pub fn is_graph_built(&self) -> bool {
        self.graph.is_some()
    }

    fn graph(&self) -> Result<&AdjacencyGraph, BoardError> {
        self.graph.as_ref().ok_or(BoardError::GraphNotBuilt)
    }

    fn index_of(&self, id: TileId) -> Result<usize, BoardError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(BoardError::UnknownTile(id))
    }

    /// Assign a biome to the tile and propagate the consequences to the surrounding tiles.
    ///
    /// Terrain and biome combinations without rule are accepted. The tile strength is then
    /// [`Strength::Default`].
    ///
    /// # Errors
    ///
    /// The method returns an error when the tile does not exist or when the graph is not built.
    pub fn set_biome(&mut self, id: TileId, biome: Biome) -> Result<(), BoardError> {
        let tile: usize = self.index_of(id)?;
        self.graph()?;

        let mut touched: Vec<usize> = Vec::new();
        if let Some(w) = self.release_claim(tile) {
            touched.push(w);
        }

        self.tiles[tile].biome = biome;
        debug!("Set {biome} on {} tile {id}", self.tiles[tile].terrain());

        let kind: Option<DependentKind> =
            Rule::for_tile(self.tiles[tile].terrain(), biome).dependent_kind();
        if let Some(kind) = kind {
            let selected: Option<usize> =
                rules::select_water(&self.tiles, self.graph()?, &self.supports, tile);
            if let Some(w) = selected {
                debug!("Tile {id} claims water tile {}", self.tiles[w].id());
                self.supports[w].claim(tile, kind);
                self.tiles[tile].claim = Some(w);
                if !touched.contains(&w) {
                    touched.push(w);
                }
            }
        }

        self.cascade(tile, &touched)
    }

    /// Remove the biome from the tile and release its water claim.
    ///
    /// Nothing happens if the tile has no biome.
    ///
    /// # Errors
    ///
    /// The method returns an error when the tile does not exist or when the graph is not built.
    pub fn clear_biome(&mut self, id: TileId) -> Result<(), BoardError> {
        let tile: usize = self.index_of(id)?;
        self.graph()?;

        if !self.tiles[tile].biome.is_assigned() {
            return Ok(());
        }

        let mut touched: Vec<usize> = Vec::new();
        if let Some(w) = self.release_claim(tile) {
            touched.push(w);
        }
        self.tiles[tile].biome = Biome::None;
        debug!("Cleared tile {id}");

        self.cascade(tile, &touched)
    }

    /// Release the water claim of the tile and return the released water tile.
    fn release_claim(&mut self, tile: usize) -> Option<usize> {
        let w: usize = self.tiles[tile].claim.take()?;
        self.supports[w].release(tile);
        debug!(
            "Tile {} releases water tile {}",
            self.tiles[tile].id(),
            self.tiles[w].id()
        );
        Some(w)
    }

    /// Recompute the tile, its neighbors, and the dependents of the touched water tiles.
    fn cascade(&mut self, tile: usize, touched: &[usize]) -> Result<(), BoardError> {
        let graph: &AdjacencyGraph = self.graph()?;

        let mut to_update: Vec<usize> = vec![tile];
        let dependents = touched.iter().flat_map(|w| self.supports[*w].dependents());
        for t in graph.neighbors(tile).iter().copied().chain(dependents) {
            if !to_update.contains(&t) {
                to_update.push(t);
            }
        }

        for t in to_update {
            self.recompute(t);
        }
        Ok(())
    }

    /// Recompute the strength of every tile.
    ///
    /// # Errors
    ///
    /// The method returns an error when the graph is not built.
    pub fn refresh(&mut self) -> Result<(), BoardError> {
        self.graph()?;
        for i in 0..self.tiles.len() {
            self.recompute(i);
        }
        Ok(())
    }

    /// Evaluate the rules for the tile, store the strength, and report the tile.
    fn recompute(&mut self, tile: usize) {
        let strength: Strength = match &self.graph {
            Some(graph) => rules::evaluate(&self.tiles, graph, &self.supports, tile),
            None => return,
        };
        self.tiles[tile].strength = strength;
        self.renderer.update_visual(&self.tiles[tile]);
    }

    /// Find the shortest path between two tiles through biome-assigned tiles.
    ///
    /// The path is empty when a tile does not exist, has no biome, or is not reachable.
    ///
    /// # Errors
    ///
    /// The method returns an error when the graph is not built.
    pub fn find_path(&self, start: TileId, end: TileId) -> Result<Path, BoardError> {
        let graph: &AdjacencyGraph = self.graph()?;
        Ok(path::find_path(
            &self.tiles,
            graph,
            self.index.get(&start).copied(),
            self.index.get(&end).copied(),
        ))
    }

    /// Return the tile with the given identifier.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.index.get(&id).map(|i| &self.tiles[*i])
    }

    /// Return all the tiles, in creation order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Return the neighbors of the tile, in neighbor-list order.
    ///
    /// # Errors
    ///
    /// The method returns an error when the tile does not exist or when the graph is not built.
    pub fn neighbors(&self, id: TileId) -> Result<Vec<TileId>, BoardError> {
        let tile: usize = self.index_of(id)?;
        Ok(self
            .graph()?
            .neighbors(tile)
            .iter()
            .map(|n| self.tiles[*n].id())
            .collect())
    }

    /// Return the water tile that the tile claims as support.
    pub fn claimed_water(&self, id: TileId) -> Option<TileId> {
        let tile: &Tile = self.tile(id)?;
        tile.claim.map(|w| self.tiles[w].id())
    }

    /// Return the tiles that claim the given water tile, in claim order.
    pub fn dependents(&self, water: TileId) -> Vec<TileId> {
        match self.index.get(&water) {
            Some(w) => self.supports[*w]
                .dependents()
                .map(|t| self.tiles[t].id())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Return the claim tracker of the given water tile.
    pub fn support(&self, water: TileId) -> Option<&WaterSupport> {
        self.index.get(&water).map(|w| &self.supports[*w])
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Set or remove the path mark of the tile.
    pub(crate) fn set_mark(&mut self, id: TileId, mark: Option<PathMark>) {
        if let Some(i) = self.index.get(&id).copied()
            && self.tiles[i].mark != mark
        {
            self.tiles[i].mark = mark;
            self.renderer.update_visual(&self.tiles[i]);
        }
    }

    /// Remove all the path marks.
    pub(crate) fn clear_marks(&mut self) {
        for i in 0..self.tiles.len() {
            if self.tiles[i].mark.take().is_some() {
                self.renderer.update_visual(&self.tiles[i]);
            }
        }
    }

    /// Force the strength of the tile, outside of the rules. Used for the dice roll outcome.
    pub(crate) fn override_strength(&mut self, id: TileId, strength: Strength) {
        if let Some(i) = self.index.get(&id).copied() {
            self.tiles[i].strength = strength;
            self.renderer.update_visual(&self.tiles[i]);
        }
    }

    /// Return a text representation of the board.
    ///
    /// Each tile is three characters: the terrain, the biome (`-` for none), and the strength
    /// (`+` strong, `!` weak, `x` bad, `?` not computed). Odd rows are shifted by half a tile.
    pub fn to_ascii(&self) -> String {
        let mut s: String = String::new();
        let (min_x, max_x, min_y, max_y) = match self.bounds() {
            Some(b) => b,
            None => return s,
        };

        for y in min_y..=max_y {
            if y.rem_euclid(2) == 1 {
                s.push_str("  ");
            }
            for x in min_x..=max_x {
                match self.tile(TileId::new(x, y)) {
                    Some(t) => {
                        let biome: char = match t.biome() {
                            Biome::None => '-',
                            Biome::Forest => 'f',
                            Biome::Cave => 'c',
                            Biome::Glacier => 'g',
                            Biome::Oasis => 'o',
                        };
                        let strength: char = match t.strength() {
                            Strength::Strong => '+',
                            Strength::Weak => '!',
                            Strength::Bad => 'x',
                            Strength::Default => '?',
                        };
                        s.push(t.terrain().map_char());
                        s.push(biome);
                        s.push(strength);
                        s.push(' ');
                    }
                    None => s.push_str("    "),
                }
            }
            s.truncate(s.trim_end_matches(' ').len());
            s.push('\n');
        }
        s
    }

    /// Smallest and largest grid coordinates.
    fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let first: TileId = self.tiles.first()?.id();
        Some(self.tiles.iter().fold(
            (first.x, first.x, first.y, first.y),
            |(min_x, max_x, min_y, max_y), t| {
                let id: TileId = t.id();
                (
                    min_x.min(id.x),
                    max_x.max(id.x),
                    min_y.min(id.y),
                    max_y.max(id.y),
                )
            },
        ))
    }
}
