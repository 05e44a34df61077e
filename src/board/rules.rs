/*
rules.rs

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

//! Biome rule table.
//!
//! | Terrain            | Biome   | Strength                                                   |
//! |--------------------|---------|------------------------------------------------------------|
//! | Desert or Mountain | Cave    | Strong without water neighbor or with a glacier neighbor   |
//! | Desert             | Oasis   | Strong when the claimed water tile is not in conflict      |
//! | Water              | Glacier | Weak next to a desert                                      |
//! | Plain              | Forest  | Strong when the claimed water tile supports nothing else   |
//! | any                | None    | Strong                                                     |
//!
//! Any other combination has no rule and keeps the [`Strength::Default`] value.
//!
//! The functions in this module do not modify the board. [`select_water`] is used once, when the
//! biome is assigned, to choose the water tile to claim. [`evaluate`] computes the strength from
//! the current claims, and can be called any number of times.

use log::debug;

use super::graph::AdjacencyGraph;
use super::support::{DependentKind, WaterSupport};
use super::terrain::{Biome, Strength, Terrain};
use super::tile::Tile;

/// Rule that applies to a terrain and biome combination.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    /// No biome.
    Baseline,
    Cave,
    Oasis,
    Glacier,
    Forest,

    /// The combination has no rule.
    Unhandled,
}

impl Rule {
    /// Return the rule for the given terrain and biome.
    pub fn for_tile(terrain: Terrain, biome: Biome) -> Self {
        match (terrain, biome) {
            (_, Biome::None) => Rule::Baseline,
            (Terrain::Desert | Terrain::Mountain, Biome::Cave) => Rule::Cave,
            (Terrain::Desert, Biome::Oasis) => Rule::Oasis,
            (Terrain::Water, Biome::Glacier) => Rule::Glacier,
            (Terrain::Plain, Biome::Forest) => Rule::Forest,
            _ => Rule::Unhandled,
        }
    }

    /// Kind of support claim the rule registers on a water neighbor, if any.
    pub fn dependent_kind(&self) -> Option<DependentKind> {
        match self {
            Rule::Cave => Some(DependentKind::Cave),
            Rule::Oasis => Some(DependentKind::Oasis),
            Rule::Forest => Some(DependentKind::Forest),
            Rule::Baseline | Rule::Glacier | Rule::Unhandled => None,
        }
    }
}

/// Water neighbors of the given tile, in neighbor-list order.
fn water_neighbors<'a>(
    tiles: &'a [Tile],
    graph: &'a AdjacencyGraph,
    tile: usize,
) -> impl Iterator<Item = usize> + 'a {
    graph
        .neighbors(tile)
        .iter()
        .copied()
        .filter(|n| tiles[*n].terrain() == Terrain::Water)
}

/// Choose the water tile that the given tile must claim for its current biome.
///
/// The first water neighbor that accepts the claim wins. When no water neighbor accepts it, the
/// first water neighbor is claimed anyway, which puts that water tile in conflict. Return None
/// when the rule needs no water or when the tile has no water neighbor.
pub fn select_water(
    tiles: &[Tile],
    graph: &AdjacencyGraph,
    supports: &[WaterSupport],
    tile: usize,
) -> Option<usize> {
    let t: &Tile = &tiles[tile];
    let kind: DependentKind = Rule::for_tile(t.terrain(), t.biome()).dependent_kind()?;

    water_neighbors(tiles, graph, tile)
        .find(|w| supports[*w].accepts(kind))
        .or_else(|| water_neighbors(tiles, graph, tile).next())
}

/// Compute the strength of the given tile from the current state of the board.
pub fn evaluate(
    tiles: &[Tile],
    graph: &AdjacencyGraph,
    supports: &[WaterSupport],
    tile: usize,
) -> Strength {
    let t: &Tile = &tiles[tile];

    match Rule::for_tile(t.terrain(), t.biome()) {
        Rule::Baseline => Strength::Strong,
        Rule::Cave => {
            let mut has_water: bool = false;
            for w in water_neighbors(tiles, graph, tile) {
                if tiles[w].biome() == Biome::Glacier {
                    return Strength::Strong;
                }
                has_water = true;
            }
            if has_water {
                Strength::Weak
            } else {
                Strength::Strong
            }
        }
        Rule::Oasis => claimed_strength(supports, t.claim, DependentKind::Oasis),
        Rule::Forest => claimed_strength(supports, t.claim, DependentKind::Forest),
        Rule::Glacier => {
            if graph
                .neighbors(tile)
                .iter()
                .any(|n| tiles[*n].terrain() == Terrain::Desert)
            {
                Strength::Weak
            } else {
                Strength::Strong
            }
        }
        Rule::Unhandled => {
            debug!(
                "No rule for {} on {} tile {}",
                t.biome(),
                t.terrain(),
                t.id()
            );
            Strength::Default
        }
    }
}

/// Strength of a forest or an oasis given the water tile it claims.
fn claimed_strength(
    supports: &[WaterSupport],
    claim: Option<usize>,
    kind: DependentKind,
) -> Strength {
    match claim {
        Some(w) if !supports[w].is_conflicting(kind) => Strength::Strong,
        _ => Strength::Weak,
    }
}
