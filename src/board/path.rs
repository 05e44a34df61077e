/*
path.rs

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

//! Path between two tiles through biome-assigned tiles.

use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use super::graph::AdjacencyGraph;
use super::tile::{Tile, TileId};

/// Path object.
#[derive(Serialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of tiles, from the start tile to the end tile.
    path: Vec<TileId>,

    /// Instead of looking for the tile in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    visited: HashSet<TileId>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create an empty [`Path`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Path`] object from a list of tiles.
    pub fn from_vec(path: Vec<TileId>) -> Self {
        let visited: HashSet<TileId> = path.iter().copied().collect();
        Self { path, visited }
    }

    /// Get the number of tiles in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the tile is in the path or not.
    pub fn contains(&self, tile: TileId) -> bool {
        self.visited.contains(&tile)
    }

    /// Return the tiles of the path.
    pub fn get(&self) -> &[TileId] {
        &self.path
    }

    /// Return the first tile in the path.
    pub fn get_first(&self) -> Option<TileId> {
        self.path.first().copied()
    }

    /// Return the last tile in the path.
    pub fn get_last(&self) -> Option<TileId> {
        self.path.last().copied()
    }
}

/// Whether the path finder can walk through the tile.
fn is_walkable(tile: &Tile) -> bool {
    tile.biome().is_assigned()
}

/// Find the shortest path between two tiles, only walking through tiles that have a biome.
///
/// The search is breadth-first and visits the neighbors in neighbor-list order, so among paths of
/// the same length, the first discovered one is returned, and the result is the same at each
/// call.
/// The returned path is empty when a tile is missing, has no biome, or when the end tile cannot
/// be reached.
pub fn find_path(
    tiles: &[Tile],
    graph: &AdjacencyGraph,
    start: Option<usize>,
    end: Option<usize>,
) -> Path {
    let (start, end): (usize, usize) = match (start, end) {
        (Some(s), Some(e)) => (s, e),
        _ => return Path::new(),
    };
    if !is_walkable(&tiles[start]) || !is_walkable(&tiles[end]) {
        return Path::new();
    }

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut came_from: HashMap<usize, usize> = HashMap::new();
    let mut visited: HashSet<usize> = HashSet::new();

    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            return reconstruct_path(tiles, &came_from, end);
        }

        for n in graph.neighbors(current) {
            if !visited.contains(n) && is_walkable(&tiles[*n]) {
                visited.insert(*n);
                came_from.insert(*n, current);
                queue.push_back(*n);
            }
        }
    }

    debug!(
        "No path between {} and {}",
        tiles[start].id(),
        tiles[end].id()
    );
    Path::new()
}

/// Walk back the predecessor map from the end tile.
fn reconstruct_path(tiles: &[Tile], came_from: &HashMap<usize, usize>, end: usize) -> Path {
    let mut reversed: Vec<TileId> = vec![tiles[end].id()];
    let mut current: usize = end;

    while let Some(previous) = came_from.get(&current) {
        reversed.push(tiles[*previous].id());
        current = *previous;
    }
    reversed.reverse();
    Path::from_vec(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::layout::HexLayout;
    use crate::board::terrain::Biome;

    fn board(map: &str) -> (Vec<Tile>, AdjacencyGraph) {
        let tiles: Vec<Tile> = HexLayout::default().parse_map(map).expect("valid map");
        let graph: AdjacencyGraph = AdjacencyGraph::build(&tiles, 1.2);
        (tiles, graph)
    }

    #[test]
    fn path_only_walks_through_biomes() {
        // (0,0) (1,0) (2,0)
        //    (0,1) (1,1)
        let (mut tiles, graph) = board("PPP\nPP");
        for i in [0, 3, 4, 2] {
            tiles[i].biome = Biome::Forest;
        }

        let path: Path = find_path(&tiles, &graph, Some(0), Some(2));
        assert_eq!(
            path.get(),
            &[
                TileId::new(0, 0),
                TileId::new(0, 1),
                TileId::new(1, 1),
                TileId::new(2, 0)
            ]
        );
        assert!(!path.contains(TileId::new(1, 0)));

        // The shortcut is now available
        tiles[1].biome = Biome::Forest;
        let path: Path = find_path(&tiles, &graph, Some(0), Some(2));
        assert_eq!(path.len(), 3);
        assert_eq!(path.get_first(), Some(TileId::new(0, 0)));
        assert_eq!(path.get_last(), Some(TileId::new(2, 0)));
    }

    #[test]
    fn empty_path_when_unreachable() {
        let (mut tiles, graph) = board("PPP");
        tiles[0].biome = Biome::Forest;
        tiles[2].biome = Biome::Forest;
        assert!(find_path(&tiles, &graph, Some(0), Some(2)).is_empty());
        assert!(find_path(&tiles, &graph, None, Some(2)).is_empty());

        // End tile without biome
        tiles[1].biome = Biome::Forest;
        tiles[2].biome = Biome::None;
        assert!(find_path(&tiles, &graph, Some(0), Some(2)).is_empty());
    }

    #[test]
    fn same_start_and_end() {
        let (mut tiles, graph) = board("P");
        tiles[0].biome = Biome::Forest;
        assert_eq!(find_path(&tiles, &graph, Some(0), Some(0)).len(), 1);
    }
}
