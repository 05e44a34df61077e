/*
presenter.rs

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

//! Presentation collaborators.
//!
//! The board and the session never draw anything. They report what changed through the
//! [`TileRenderer`] and [`PanelPresenter`] traits, and the user interface decides how to show it
//! (sprite selection, panel timing, and so on).

use log::info;
use std::time::Duration;

use crate::board::tile::Tile;

/// Panels that the session asks the user interface to show.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Panel {
    /// The puzzle is solved with only strong links.
    PuzzleCorrect,

    /// The puzzle is solved but some links are weak.
    PuzzleWithWeakConnections,

    /// No path between the start and the end tiles.
    PuzzleWrong,

    /// The dice roll saved a fragile link.
    ConnectionSurvived,

    /// The dice roll broke a fragile link. The game is over.
    ConnectionLost,
}

impl Panel {
    /// How long the panel stays visible, or None if it stays until the game is restarted.
    pub fn display_duration(&self) -> Option<Duration> {
        match self {
            Panel::PuzzleCorrect => Some(Duration::from_secs(5)),
            Panel::PuzzleWithWeakConnections => Some(Duration::from_secs(6)),
            Panel::PuzzleWrong => Some(Duration::from_secs(2)),
            Panel::ConnectionSurvived => Some(Duration::from_millis(2500)),
            Panel::ConnectionLost => None,
        }
    }
}

/// Receive the tiles whose visual state changed.
pub trait TileRenderer {
    /// Called after the strength or the path mark of the tile has been updated.
    fn update_visual(&mut self, tile: &Tile);
}

/// Show the verdict panels.
pub trait PanelPresenter {
    fn show(&mut self, panel: Panel);
}

/// Presenter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPresenter;

impl TileRenderer for NoPresenter {
    fn update_visual(&mut self, _tile: &Tile) {}
}

impl PanelPresenter for NoPresenter {
    fn show(&mut self, _panel: Panel) {}
}

/// Presenter that reports the changes in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl TileRenderer for LogPresenter {
    fn update_visual(&mut self, tile: &Tile) {
        info!(
            "Tile {}: {} {} {}",
            tile.id(),
            tile.terrain(),
            tile.biome(),
            tile.strength()
        );
    }
}

impl PanelPresenter for LogPresenter {
    fn show(&mut self, panel: Panel) {
        info!("Panel {panel:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_durations() {
        assert_eq!(
            Panel::PuzzleCorrect.display_duration(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            Panel::PuzzleWithWeakConnections.display_duration(),
            Some(Duration::from_secs(6))
        );
        assert_eq!(
            Panel::PuzzleWrong.display_duration(),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            Panel::ConnectionSurvived.display_duration(),
            Some(Duration::from_millis(2500))
        );

        // The game over panel stays until the puzzle is reset
        assert_eq!(Panel::ConnectionLost.display_duration(), None);
    }
}
