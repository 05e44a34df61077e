/*
session.rs

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

//! Manage the status of a puzzle in progress.
//!
//! The player assigns biomes to the tiles, then asks for a puzzle check. The check looks for a
//! path of biome-assigned tiles between the start and the end tiles, and counts the weak tiles on
//! that path.
//!
//! When the path has weak tiles, the player can roll the dice for one of them: with a roll of four
//! or more the link survives and becomes strong, otherwise the link is lost and the game is over.

use log::{debug, info};
use rand::Rng;
use std::error::Error;
use std::fmt;

use crate::board::path::Path;
use crate::board::terrain::{Biome, PathMark, Strength};
use crate::board::tile::{Tile, TileId};
use crate::board::{Board, BoardError};
use crate::presenter::{NoPresenter, Panel, PanelPresenter, TileRenderer};

/// Highest dice roll that breaks a fragile link.
const LOSING_ROLL_MAX: u8 = 3;

/// Result of a puzzle check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A path exists and all its tiles are strong.
    Pass,

    /// A path exists with the given number of weak tiles.
    PassWithWeakLinks(usize),

    /// No path between the start and the end tiles.
    Fail,
}

impl Verdict {
    /// Panel that presents the verdict.
    pub fn panel(&self) -> Panel {
        match self {
            Verdict::Pass => Panel::PuzzleCorrect,
            Verdict::PassWithWeakLinks(_) => Panel::PuzzleWithWeakConnections,
            Verdict::Fail => Panel::PuzzleWrong,
        }
    }
}

/// Outcome of a dice roll on a fragile link.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiceOutcome {
    Survived,
    Lost,
}

/// Errors raised by the session operations.
#[derive(Debug, PartialEq)]
pub enum SessionError {
    Board(BoardError),

    /// The tile is part of the puzzle definition and cannot be changed.
    TileLocked(TileId),

    /// The biome menu of the tile does not offer that biome.
    BiomeNotAllowed(TileId, Biome),

    /// A dice roll is in progress.
    InteractionLocked,

    /// A fragile link was lost.
    GameOver,

    NoDiceRollPending,

    /// The tile is not a fragile tile of the last puzzle check.
    NotFragile(TileId),

    /// A dice roll is between 1 and 6.
    InvalidRoll(u8),
}

impl From<BoardError> for SessionError {
    fn from(value: BoardError) -> Self {
        SessionError::Board(value)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::Board(err) => write!(f, "{err}"),
            SessionError::TileLocked(id) => write!(f, "tile {id} cannot be changed"),
            SessionError::BiomeNotAllowed(id, biome) => {
                write!(f, "{biome} is not available for tile {id}")
            }
            SessionError::InteractionLocked => write!(f, "a dice roll is in progress"),
            SessionError::GameOver => write!(f, "the game is over"),
            SessionError::NoDiceRollPending => write!(f, "no dice roll in progress"),
            SessionError::NotFragile(id) => write!(f, "tile {id} is not a fragile link"),
            SessionError::InvalidRoll(roll) => write!(f, "invalid dice roll {roll}"),
        }
    }
}

impl Error for SessionError {}

/// Roll a six-sided die.
pub fn roll_dice<G: Rng + ?Sized>(rng: &mut G) -> u8 {
    rng.random_range(1..=6)
}

/// Manage the status of the puzzle in progress.
#[derive(Debug)]
pub struct PuzzleSession<R: TileRenderer = NoPresenter, P: PanelPresenter = NoPresenter> {
    board: Board<R>,

    /// The path must connect these two tiles.
    start: TileId,
    end: TileId,

    panel: P,

    /// Weak tiles on the path found by the last check, in path order. Tiles saved by a dice roll
    /// are removed from the list.
    weak_tiles: Vec<TileId>,

    /// Path found by the last check.
    last_path: Path,

    /// Result of the last check.
    last_verdict: Option<Verdict>,

    /// Fragile tile for which the dice is being rolled. Interactions are locked meanwhile.
    pending_roll: Option<TileId>,

    /// Whether a fragile link was lost.
    game_over: bool,
}

impl<R: TileRenderer, P: PanelPresenter> PuzzleSession<R, P> {
    /// Create a [`PuzzleSession`] object.
    ///
    /// The graph of the board must be built before the session is used.
    pub fn new(board: Board<R>, start: TileId, end: TileId, panel: P) -> Self {
        Self {
            board,
            start,
            end,
            panel,
            weak_tiles: Vec::new(),
            last_path: Path::new(),
            last_verdict: None,
            pending_roll: None,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn start(&self) -> TileId {
        self.start
    }

    pub fn end(&self) -> TileId {
        self.end
    }

    /// Whether the player can change the tiles.
    pub fn can_interact(&self) -> bool {
        !self.game_over && self.pending_roll.is_none()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Number of weak links left on the path of the last check.
    pub fn weak_connections(&self) -> usize {
        self.weak_tiles.len()
    }

    /// Weak tiles left on the path of the last check.
    pub fn weak_tiles(&self) -> &[TileId] {
        &self.weak_tiles
    }

    /// Path found by the last check.
    pub fn last_path(&self) -> &Path {
        &self.last_path
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    /// Verify that the player can interact with the board.
    fn ensure_interactive(&self) -> Result<(), SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        if self.pending_roll.is_some() {
            return Err(SessionError::InteractionLocked);
        }
        Ok(())
    }

    /// Return the tile if the player can change it.
    fn clickable_tile(&self, id: TileId) -> Result<&Tile, SessionError> {
        let tile: &Tile = self
            .board
            .tile(id)
            .ok_or(SessionError::Board(BoardError::UnknownTile(id)))?;
        if !tile.is_clickable() {
            return Err(SessionError::TileLocked(id));
        }
        Ok(tile)
    }

    /// Assign the biome that the player chose in the biome menu.
    ///
    /// Choosing [`Biome::None`] clears the tile.
    ///
    /// # Errors
    ///
    /// The method returns an error when the tile is locked, when its menu does not offer the biome,
    /// or when interactions are not possible.
    pub fn assign_biome(&mut self, id: TileId, biome: Biome) -> Result<(), SessionError> {
        if biome == Biome::None {
            return self.clear_biome(id);
        }
        self.ensure_interactive()?;
        if !self.clickable_tile(id)?.allowed_biomes().contains(&biome) {
            return Err(SessionError::BiomeNotAllowed(id, biome));
        }
        self.board.set_biome(id, biome)?;
        self.discard_check();
        Ok(())
    }

    /// Remove the biome that the player assigned to the tile.
    ///
    /// # Errors
    ///
    /// The method returns an error when the tile is locked or when interactions are not possible.
    pub fn clear_biome(&mut self, id: TileId) -> Result<(), SessionError> {
        self.ensure_interactive()?;
        self.clickable_tile(id)?;
        self.board.clear_biome(id)?;
        self.discard_check();
        Ok(())
    }

    /// Forget the result of the last check after the board changes.
    ///
    /// The fragile tiles of an older board cannot be rolled for.
    fn discard_check(&mut self) {
        if self.last_verdict.is_none() {
            return;
        }
        debug!("Board changed, discarding the last check");
        self.board.clear_marks();
        self.weak_tiles.clear();
        self.last_path = Path::new();
        self.last_verdict = None;
    }

    /// Check the puzzle, mark the tiles of the path, and show the verdict panel.
    ///
    /// Strong tiles on the path are marked [`PathMark::Safe`], and weak tiles
    /// [`PathMark::Fragile`].
    ///
    /// # Errors
    ///
    /// The method returns an error when interactions are not possible or when the graph of the
    /// board is not built.
    pub fn check_puzzle(&mut self) -> Result<Verdict, SessionError> {
        self.ensure_interactive()?;
        let path: Path = self.board.find_path(self.start, self.end)?;

        self.board.clear_marks();
        self.weak_tiles.clear();

        let verdict: Verdict = if path.len() <= 1 {
            Verdict::Fail
        } else {
            for id in path.get() {
                match self.board.tile(*id).map(|t| t.strength()) {
                    Some(Strength::Weak) => {
                        self.weak_tiles.push(*id);
                        self.board.set_mark(*id, Some(PathMark::Fragile));
                    }
                    Some(Strength::Strong) => self.board.set_mark(*id, Some(PathMark::Safe)),
                    _ => (),
                }
            }
            if self.weak_tiles.is_empty() {
                Verdict::Pass
            } else {
                Verdict::PassWithWeakLinks(self.weak_tiles.len())
            }
        };

        info!(
            "Puzzle check: {verdict:?} (path of {} tiles: {:?})",
            path.len(),
            path.get()
        );
        self.last_path = path;
        self.last_verdict = Some(verdict);
        self.panel.show(verdict.panel());
        Ok(verdict)
    }

    /// Start a dice roll for a fragile tile. Interactions are locked until the roll is resolved.
    ///
    /// # Errors
    ///
    /// The method returns an error when the tile is not a fragile tile of the last check or when
    /// interactions are not possible.
    pub fn begin_dice_roll(&mut self, id: TileId) -> Result<(), SessionError> {
        self.ensure_interactive()?;
        if !self.weak_tiles.contains(&id) {
            return Err(SessionError::NotFragile(id));
        }
        debug!("Rolling the dice for tile {id}");
        self.pending_roll = Some(id);
        Ok(())
    }

    /// Apply the result of the dice roll to the pending fragile tile.
    ///
    /// A surviving tile is forced to [`Strength::Strong`] until the board recomputes it. The next
    /// biome change on the tile or on one of its neighbours evaluates the rules again, and the tile
    /// can become weak again.
    ///
    /// # Errors
    ///
    /// The method returns an error when the roll is not between 1 and 6, or when no roll is in
    /// progress.
    pub fn resolve_dice_roll(&mut self, roll: u8) -> Result<DiceOutcome, SessionError> {
        if !(1..=6).contains(&roll) {
            return Err(SessionError::InvalidRoll(roll));
        }
        let id: TileId = self
            .pending_roll
            .ok_or(SessionError::NoDiceRollPending)?;

        if roll <= LOSING_ROLL_MAX {
            info!("Rolled {roll}: link {id} is lost");
            self.board.override_strength(id, Strength::Bad);
            self.game_over = true;
            self.panel.show(Panel::ConnectionLost);
            return Ok(DiceOutcome::Lost);
        }

        info!("Rolled {roll}: link {id} survived");
        self.board.override_strength(id, Strength::Strong);
        self.board.set_mark(id, Some(PathMark::Safe));
        self.weak_tiles.retain(|t| *t != id);
        self.pending_roll = None;
        self.panel.show(Panel::ConnectionSurvived);
        Ok(DiceOutcome::Survived)
    }

    /// Roll the dice for a fragile tile and resolve the roll immediately.
    ///
    /// # Errors
    ///
    /// See [`PuzzleSession::begin_dice_roll`].
    pub fn roll_for<G: Rng + ?Sized>(
        &mut self,
        id: TileId,
        rng: &mut G,
    ) -> Result<(u8, DiceOutcome), SessionError> {
        self.begin_dice_roll(id)?;
        let roll: u8 = roll_dice(rng);
        let outcome: DiceOutcome = self.resolve_dice_roll(roll)?;
        Ok((roll, outcome))
    }

    /// Restart the puzzle: clear the biomes that the player assigned, but keep the locked tiles.
    ///
    /// # Errors
    ///
    /// The method returns an error when the graph of the board is not built.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let ids: Vec<TileId> = self
            .board
            .tiles()
            .iter()
            .filter(|t| t.is_clickable() && t.biome().is_assigned())
            .map(|t| t.id())
            .collect();
        for id in ids {
            self.board.clear_biome(id)?;
        }
        self.board.clear_marks();
        self.board.refresh()?;
        self.weak_tiles.clear();
        self.last_path = Path::new();
        self.last_verdict = None;
        self.pending_roll = None;
        self.game_over = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::layout::HexLayout;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Presenter that records the panels.
    #[derive(Default)]
    struct Panels {
        shown: Vec<Panel>,
    }

    impl PanelPresenter for Panels {
        fn show(&mut self, panel: Panel) {
            self.shown.push(panel);
        }
    }

    fn id(x: i32, y: i32) -> TileId {
        TileId::new(x, y)
    }

    /// Start mountain, desert in the middle, end mountain, and a water tile below each cave.
    ///
    /// ```text
    /// M D M
    ///  W W
    /// ```
    fn session() -> PuzzleSession<NoPresenter, Panels> {
        let layout: HexLayout = HexLayout::default();
        let tiles: Vec<Tile> = layout
            .parse_map("MDM\nWW")
            .expect("valid map")
            .into_iter()
            .map(|t| {
                if t.id() == id(0, 0) || t.id() == id(2, 0) {
                    t.locked()
                } else {
                    t
                }
            })
            .collect();
        let mut board: Board = Board::new(tiles);
        board
            .build_graph(layout.neighbor_radius())
            .expect("valid radius");
        board.set_biome(id(0, 0), Biome::Cave).expect("start");
        board.set_biome(id(2, 0), Biome::Cave).expect("end");
        PuzzleSession::new(board, id(0, 0), id(2, 0), Panels::default())
    }

    #[test]
    fn locked_tiles_and_menu_rules() {
        let mut s = session();
        assert_eq!(
            s.assign_biome(id(0, 0), Biome::None),
            Err(SessionError::TileLocked(id(0, 0)))
        );
        assert_eq!(
            s.assign_biome(id(1, 0), Biome::Cave),
            Err(SessionError::BiomeNotAllowed(id(1, 0), Biome::Cave))
        );
        assert_eq!(
            s.assign_biome(id(1, 0), Biome::Forest),
            Err(SessionError::BiomeNotAllowed(id(1, 0), Biome::Forest))
        );
        assert_eq!(
            s.assign_biome(id(9, 9), Biome::Oasis),
            Err(SessionError::Board(BoardError::UnknownTile(id(9, 9))))
        );
        assert!(s.assign_biome(id(1, 0), Biome::Oasis).is_ok());
    }

    #[test]
    fn check_without_path_fails() {
        let mut s = session();
        assert_eq!(s.check_puzzle(), Ok(Verdict::Fail));
        assert_eq!(s.panel().shown, vec![Panel::PuzzleWrong]);
        assert!(s.last_path().is_empty());
    }

    #[test]
    fn check_marks_the_path() {
        let mut s = session();
        // Caves next to plain water are weak
        s.assign_biome(id(1, 0), Biome::Oasis).expect("oasis");
        assert_eq!(s.check_puzzle(), Ok(Verdict::PassWithWeakLinks(2)));
        assert_eq!(s.weak_tiles(), &[id(0, 0), id(2, 0)]);
        let board: &Board = s.board();
        assert_eq!(board.tile(id(1, 0)).and_then(|t| t.mark()), Some(PathMark::Safe));
        assert_eq!(board.tile(id(0, 0)).and_then(|t| t.mark()), Some(PathMark::Fragile));

        // Glaciers make the caves strong
        s.assign_biome(id(0, 1), Biome::Glacier).expect("glacier");
        assert_eq!(s.check_puzzle(), Ok(Verdict::PassWithWeakLinks(1)));
        s.assign_biome(id(1, 1), Biome::Glacier).expect("glacier");
        assert_eq!(s.check_puzzle(), Ok(Verdict::Pass));
        assert_eq!(
            s.panel().shown,
            vec![
                Panel::PuzzleWithWeakConnections,
                Panel::PuzzleWithWeakConnections,
                Panel::PuzzleCorrect
            ]
        );
    }

    #[test]
    fn surviving_dice_roll() {
        let mut s = session();
        s.assign_biome(id(1, 0), Biome::Oasis).expect("oasis");
        s.check_puzzle().expect("check");

        assert_eq!(
            s.begin_dice_roll(id(1, 0)),
            Err(SessionError::NotFragile(id(1, 0)))
        );
        assert_eq!(s.resolve_dice_roll(5), Err(SessionError::NoDiceRollPending));

        s.begin_dice_roll(id(0, 0)).expect("fragile");
        assert!(!s.can_interact());
        assert_eq!(
            s.assign_biome(id(1, 0), Biome::None),
            Err(SessionError::InteractionLocked)
        );
        assert_eq!(s.resolve_dice_roll(7), Err(SessionError::InvalidRoll(7)));
        assert_eq!(s.resolve_dice_roll(4), Ok(DiceOutcome::Survived));

        assert!(s.can_interact());
        assert_eq!(s.weak_connections(), 1);
        let tile: &Tile = s.board().tile(id(0, 0)).expect("tile");
        assert_eq!(tile.strength(), Strength::Strong);
        assert_eq!(tile.mark(), Some(PathMark::Safe));
        assert_eq!(s.panel().shown.last(), Some(&Panel::ConnectionSurvived));
    }

    #[test]
    fn losing_dice_roll_ends_the_game() {
        let mut s = session();
        s.assign_biome(id(1, 0), Biome::Oasis).expect("oasis");
        s.check_puzzle().expect("check");
        s.begin_dice_roll(id(2, 0)).expect("fragile");
        assert_eq!(s.resolve_dice_roll(3), Ok(DiceOutcome::Lost));

        assert!(s.is_game_over());
        assert_eq!(
            s.board().tile(id(2, 0)).map(|t| t.strength()),
            Some(Strength::Bad)
        );
        assert_eq!(s.check_puzzle(), Err(SessionError::GameOver));
        assert_eq!(s.panel().shown.last(), Some(&Panel::ConnectionLost));

        s.reset().expect("reset");
        assert!(s.can_interact());
        assert_eq!(
            s.board().tile(id(1, 0)).map(|t| t.biome()),
            Some(Biome::None)
        );
        assert_eq!(
            s.board().tile(id(2, 0)).map(|t| t.biome()),
            Some(Biome::Cave)
        );
        assert_eq!(s.check_puzzle(), Ok(Verdict::Fail));
    }

    #[test]
    fn board_changes_discard_the_check() {
        let mut s = session();
        s.assign_biome(id(1, 0), Biome::Oasis).expect("oasis");
        assert_eq!(s.check_puzzle(), Ok(Verdict::PassWithWeakLinks(2)));
        s.begin_dice_roll(id(0, 0)).expect("fragile");
        assert_eq!(s.resolve_dice_roll(6), Ok(DiceOutcome::Survived));

        s.clear_biome(id(1, 0)).expect("clear");
        assert_eq!(s.last_verdict(), None);
        assert!(s.weak_tiles().is_empty());
        assert!(s.last_path().is_empty());
        assert_eq!(
            s.begin_dice_roll(id(2, 0)),
            Err(SessionError::NotFragile(id(2, 0)))
        );
        assert!(s.can_interact());

        // The survived cave is evaluated again with its neighbour change
        let tile: &Tile = s.board().tile(id(0, 0)).expect("tile");
        assert_eq!(tile.strength(), Strength::Weak);
        assert_eq!(tile.mark(), None);
        let tile: &Tile = s.board().tile(id(2, 0)).expect("tile");
        assert_eq!(tile.strength(), Strength::Weak);
        assert_eq!(tile.mark(), None);
    }

    #[test]
    fn seeded_rolls_are_dice_values() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let roll: u8 = roll_dice(&mut rng);
            assert!((1..=6).contains(&roll));
        }

        let mut s = session();
        s.assign_biome(id(1, 0), Biome::Oasis).expect("oasis");
        s.check_puzzle().expect("check");
        let (roll, outcome) = s.roll_for(id(0, 0), &mut rng).expect("roll");
        let expected: DiceOutcome = if roll <= 3 {
            DiceOutcome::Lost
        } else {
            DiceOutcome::Survived
        };
        assert_eq!(outcome, expected);
    }
}
