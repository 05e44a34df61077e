/*
support.rs

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

//! Support claims registered against water tiles.
//!
//! Forests, oases, and caves lean on an adjacent water tile. A forest needs the water tile for
//! itself: any other dependent, cave included, makes it weak. A water tile feeds up to two oases,
//! which ignore caves but not forests.

use serde::{Deserialize, Serialize};

/// Maximum number of oases a water tile feeds before all of them become weak.
pub const OASIS_CAPACITY: usize = 2;

/// Maximum number of dependents, of any kind, on a water tile that feeds a forest.
pub const FOREST_CAPACITY: usize = 1;

/// Kind of a tile that claims a water tile as support.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DependentKind {
    Forest,
    Oasis,
    Cave,
}

/// Claims on a single water tile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WaterSupport {
    /// Claiming tile indexes with their kind, in claim order.
    dependents: Vec<(usize, DependentKind)>,
}

impl WaterSupport {
    /// Register a claim. A tile holds at most one claim on a given water tile: a new claim from the
    /// same tile replaces the previous one.
    pub fn claim(&mut self, tile: usize, kind: DependentKind) {
        match self.dependents.iter_mut().find(|d| d.0 == tile) {
            Some(d) => d.1 = kind,
            None => self.dependents.push((tile, kind)),
        }
    }

    /// Release the claim of the given tile. Return whether a claim existed.
    pub fn release(&mut self, tile: usize) -> bool {
        let len: usize = self.dependents.len();
        self.dependents.retain(|d| d.0 != tile);
        len != self.dependents.len()
    }

    /// Number of dependents of the given kind.
    pub fn count(&self, kind: DependentKind) -> usize {
        self.dependents.iter().filter(|d| d.1 == kind).count()
    }

    /// Whether the water tile can take a new claim of the given kind without getting in conflict.
    pub fn accepts(&self, kind: DependentKind) -> bool {
        let forests: usize = self.count(DependentKind::Forest);
        let oases: usize = self.count(DependentKind::Oasis);
        match kind {
            DependentKind::Forest => self.len() < FOREST_CAPACITY,
            DependentKind::Oasis => oases < OASIS_CAPACITY && forests == 0,
            DependentKind::Cave => forests == 0,
        }
    }

    /// Whether the dependents of the given kind are over capacity or share the water tile with a
    /// dependent they cannot live with. In that case all of them are weak.
    pub fn is_conflicting(&self, kind: DependentKind) -> bool {
        let forests: usize = self.count(DependentKind::Forest);
        let oases: usize = self.count(DependentKind::Oasis);
        match kind {
            DependentKind::Forest => forests > 0 && self.len() > FOREST_CAPACITY,
            DependentKind::Oasis => oases > OASIS_CAPACITY || (forests > 0 && oases > 0),
            DependentKind::Cave => false,
        }
    }

    /// Indexes of the claiming tiles, in claim order.
    pub fn dependents(&self) -> impl Iterator<Item = usize> + '_ {
        self.dependents.iter().map(|d| d.0)
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}
