/*
graph.rs

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

//! Neighbor relation between the tiles of the board.

use log::debug;

use super::tile::Tile;

/// Undirected adjacency graph over tile indexes.
///
/// The order of each neighbor list is the order in which the edges were discovered. The rule
/// engine and the path finder iterate in that order, which makes their results reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyGraph {
    /// For each tile index, the indexes of its neighbors.
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// Build the graph for the given tiles.
    ///
    /// Two tiles are neighbors when the distance between their centers is at most `radius`.
    pub fn build(tiles: &[Tile], radius: f64) -> Self {
        let mut graph: AdjacencyGraph = AdjacencyGraph::default();
        graph.connect_within(tiles, radius);
        graph
    }

    /// Add the edges between the tiles that are within `radius` of each other.
    ///
    /// Existing edges are kept and never duplicated, so calling the method again with the same
    /// tiles does not change the graph.
    pub fn connect_within(&mut self, tiles: &[Tile], radius: f64) {
        if self.neighbors.len() < tiles.len() {
            self.neighbors.resize(tiles.len(), Vec::new());
        }

        for (i, tile) in tiles.iter().enumerate() {
            for (j, other) in tiles.iter().enumerate() {
                if i != j && tile.distance(other) <= radius {
                    self.push_edge(i, j);
                }
            }
        }
        debug!(
            "Adjacency graph: {} tiles, {} edges",
            self.neighbors.len(),
            self.num_edges()
        );
    }

    /// Add the edge in both directions, unless it already exists.
    fn push_edge(&mut self, a: usize, b: usize) {
        if !self.neighbors[a].contains(&b) {
            self.neighbors[a].push(b);
        }
        if !self.neighbors[b].contains(&a) {
            self.neighbors[b].push(a);
        }
    }

    /// Return the neighbors of the given tile, in discovery order.
    pub fn neighbors(&self, tile: usize) -> &[usize] {
        match self.neighbors.get(tile) {
            Some(n) => &n[..],
            None => &[],
        }
    }

    /// Whether two tiles are neighbors.
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.neighbors.iter().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Print the graph.
    pub fn debug(&self, tiles: &[Tile]) {
        let mut s: String = String::new();

        for (i, n) in self.neighbors.iter().enumerate() {
            s.clear();
            s.push_str(&format!("{:>8} -->", tiles[i].id()));
            for j in n {
                s.push_str(&format!(" {}", tiles[*j].id()));
            }
            debug!("{s}");
        }
    }
}
