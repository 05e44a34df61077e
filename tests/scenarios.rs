/*
scenarios.rs

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

//! Game scenarios driven through the public API.

use hexbiome::board::layout::HexLayout;
use hexbiome::presenter::{NoPresenter, TileRenderer};
use hexbiome::{Biome, Board, PuzzleSession, Strength, Terrain, Tile, TileId, Verdict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Renderer that counts the visual updates.
#[derive(Debug, Default)]
struct Counter {
    updates: usize,
}

impl TileRenderer for Counter {
    fn update_visual(&mut self, _tile: &Tile) {
        self.updates += 1;
    }
}

fn id(x: i32, y: i32) -> TileId {
    TileId::new(x, y)
}

fn board(map: &str) -> Board<Counter> {
    let layout: HexLayout = HexLayout::default();
    let tiles: Vec<Tile> = layout.parse_map(map).expect("valid map");
    let mut board: Board<Counter> = Board::with_renderer(tiles, Counter::default());
    board
        .build_graph(layout.neighbor_radius())
        .expect("valid radius");
    board
}

fn strength<R: TileRenderer>(board: &Board<R>, tile: TileId) -> Strength {
    board.tile(tile).expect("tile exists").strength()
}

/// Strength, biome, and claim of every tile.
fn snapshot<R: TileRenderer>(board: &Board<R>) -> Vec<(Biome, Strength, Option<TileId>)> {
    board
        .tiles()
        .iter()
        .map(|t| (t.biome(), t.strength(), board.claimed_water(t.id())))
        .collect()
}

#[test]
fn cave_next_to_plain_water_is_weak() {
    let mut b = board("DW");
    b.set_biome(id(0, 0), Biome::Cave).expect("cave");
    assert_eq!(strength(&b, id(0, 0)), Strength::Weak);
    assert_eq!(b.claimed_water(id(0, 0)), Some(id(1, 0)));
}

#[test]
fn glacier_makes_the_cave_strong() {
    let mut b = board("DW");
    b.set_biome(id(0, 0), Biome::Cave).expect("cave");
    b.set_biome(id(1, 0), Biome::Glacier).expect("glacier");
    assert_eq!(strength(&b, id(0, 0)), Strength::Strong);

    // The glacier itself melts next to the desert
    assert_eq!(strength(&b, id(1, 0)), Strength::Weak);

    b.clear_biome(id(1, 0)).expect("clear");
    assert_eq!(strength(&b, id(0, 0)), Strength::Weak);
}

#[test]
fn third_oasis_demotes_all_oases() {
    //    D1 D2
    //  D3 W
    let mut b = board(".DD\nDW");
    let water: TileId = id(1, 1);
    let (d1, d2, d3) = (id(1, 0), id(2, 0), id(0, 1));

    b.set_biome(d1, Biome::Oasis).expect("oasis");
    b.set_biome(d2, Biome::Oasis).expect("oasis");
    assert_eq!(strength(&b, d1), Strength::Strong);
    assert_eq!(strength(&b, d2), Strength::Strong);

    b.set_biome(d3, Biome::Oasis).expect("oasis");
    assert_eq!(b.dependents(water), vec![d1, d2, d3]);
    for d in [d1, d2, d3] {
        assert_eq!(strength(&b, d), Strength::Weak);
    }

    // Removing the third oasis restores the others
    b.clear_biome(d3).expect("clear");
    assert_eq!(strength(&b, d1), Strength::Strong);
    assert_eq!(strength(&b, d2), Strength::Strong);
    assert_eq!(strength(&b, d3), Strength::Strong);
}

#[test]
fn second_forest_on_the_same_water_is_weak() {
    let mut b = board("PWP");
    b.set_biome(id(0, 0), Biome::Forest).expect("forest");
    assert_eq!(strength(&b, id(0, 0)), Strength::Strong);

    b.set_biome(id(2, 0), Biome::Forest).expect("forest");
    assert_eq!(strength(&b, id(2, 0)), Strength::Weak);
    assert_eq!(strength(&b, id(0, 0)), Strength::Weak);
}

#[test]
fn forest_cannot_share_water_with_a_cave() {
    let mut b = board("PWD");
    b.set_biome(id(2, 0), Biome::Cave).expect("cave");
    b.set_biome(id(0, 0), Biome::Forest).expect("forest");
    assert_eq!(b.dependents(id(1, 0)), vec![id(2, 0), id(0, 0)]);
    assert_eq!(strength(&b, id(0, 0)), Strength::Weak);

    b.clear_biome(id(2, 0)).expect("clear");
    assert_eq!(strength(&b, id(0, 0)), Strength::Strong);

    // A cave that comes second demotes the forest too
    b.set_biome(id(2, 0), Biome::Cave).expect("cave");
    assert_eq!(strength(&b, id(0, 0)), Strength::Weak);
}

#[test]
fn forest_and_oasis_cannot_share_water() {
    let mut b = board("PWD");
    b.set_biome(id(0, 0), Biome::Forest).expect("forest");
    b.set_biome(id(2, 0), Biome::Oasis).expect("oasis");
    assert_eq!(strength(&b, id(0, 0)), Strength::Weak);
    assert_eq!(strength(&b, id(2, 0)), Strength::Weak);

    b.set_biome(id(0, 0), Biome::None).expect("none");
    assert_eq!(strength(&b, id(2, 0)), Strength::Strong);
}

#[test]
fn check_puzzle_counts_weak_links() {
    // Forest, cave, forest between two rivers
    //
    //  W W W
    //   P M P
    //  W W W
    let layout: HexLayout = HexLayout::default();
    let mut board: Board = Board::new(layout.parse_map("WWW\nPMP\nWWW").expect("valid map"));
    board
        .build_graph(layout.neighbor_radius())
        .expect("valid radius");
    let mut s: PuzzleSession = PuzzleSession::new(board, id(0, 1), id(2, 1), NoPresenter);

    s.assign_biome(id(0, 1), Biome::Forest).expect("forest");
    s.assign_biome(id(2, 1), Biome::Forest).expect("forest");
    assert_eq!(s.check_puzzle(), Ok(Verdict::Fail));

    s.assign_biome(id(1, 0), Biome::Glacier).expect("glacier");
    s.assign_biome(id(1, 1), Biome::Cave).expect("cave");
    assert_eq!(s.board().claimed_water(id(1, 1)), Some(id(1, 0)));
    assert_eq!(s.check_puzzle(), Ok(Verdict::Pass));
    assert_eq!(s.last_path().len(), 3);

    s.clear_biome(id(1, 0)).expect("clear");
    assert_eq!(s.check_puzzle(), Ok(Verdict::PassWithWeakLinks(1)));
    assert_eq!(s.weak_tiles(), &[id(1, 1)]);
}

#[test]
fn clearing_an_empty_tile_changes_nothing() {
    let mut b = board("PWP\nDD");
    b.set_biome(id(0, 0), Biome::Forest).expect("forest");
    let before = snapshot(&b);
    let updates: usize = b.renderer().updates;

    b.clear_biome(id(2, 0)).expect("clear");
    b.clear_biome(id(2, 0)).expect("clear");
    assert_eq!(snapshot(&b), before);
    assert_eq!(b.renderer().updates, updates);
}

#[test]
fn set_then_clear_restores_the_claims() {
    let mut b = board("PWP\nDD");
    b.set_biome(id(0, 0), Biome::Forest).expect("forest");
    let water: TileId = id(1, 0);
    let dependents: Vec<TileId> = b.dependents(water);
    let before = snapshot(&b);

    for biome in [Biome::Forest, Biome::Cave, Biome::Glacier, Biome::Oasis] {
        b.set_biome(id(2, 0), biome).expect("set");
        b.clear_biome(id(2, 0)).expect("clear");
        assert_eq!(strength(&b, id(2, 0)), Strength::Strong);
        assert_eq!(b.claimed_water(id(2, 0)), None);
        assert_eq!(b.dependents(water), dependents);
        assert_eq!(snapshot(&b), before);
    }
}

#[test]
fn path_is_deterministic() {
    let mut b = board("PPPP\nPPPP\nPPPP");
    for t in b.tiles().iter().map(|t| t.id()).collect::<Vec<TileId>>() {
        b.set_biome(t, Biome::Forest).expect("forest");
    }
    let first = b.find_path(id(0, 0), id(3, 2)).expect("graph built");
    assert!(!first.is_empty());
    for _ in 0..10 {
        assert_eq!(b.find_path(id(0, 0), id(3, 2)).expect("graph built"), first);
    }
}

/// Verify the water support invariants for every water tile.
fn assert_support_rules<R: TileRenderer>(board: &Board<R>) {
    for w in board.tiles().iter().filter(|t| t.terrain() == Terrain::Water) {
        let dependents: Vec<&Tile> = board
            .dependents(w.id())
            .into_iter()
            .filter_map(|d| board.tile(d))
            .collect();
        let oases: usize = dependents
            .iter()
            .filter(|d| d.biome() == Biome::Oasis)
            .count();
        let forests: usize = dependents
            .iter()
            .filter(|d| d.biome() == Biome::Forest)
            .count();

        for d in &dependents {
            let conflict: bool = match d.biome() {
                Biome::Oasis => oases > 2 || forests > 0,
                Biome::Forest => dependents.len() > 1,
                _ => false,
            };
            if conflict {
                assert_eq!(d.strength(), Strength::Weak, "{} on {}", d.id(), w.id());
            }
        }
    }
}

#[test]
fn random_edits_keep_the_rules() {
    let map: &str = "DPDPD\nWDWPW\nPDPDP\nDWPWD";
    let mut b = board(map);
    let terrains: Vec<Terrain> = b.tiles().iter().map(|t| t.terrain()).collect();
    let ids: Vec<TileId> = b.tiles().iter().map(|t| t.id()).collect();
    let biomes: [Biome; 5] = [
        Biome::None,
        Biome::Forest,
        Biome::Cave,
        Biome::Glacier,
        Biome::Oasis,
    ];

    let mut rng: StdRng = StdRng::seed_from_u64(2025);
    for _ in 0..500 {
        let tile: TileId = ids[rng.random_range(0..ids.len())];
        let biome: Biome = biomes[rng.random_range(0..biomes.len())];
        if biome == Biome::None {
            b.clear_biome(tile).expect("clear");
        } else {
            b.set_biome(tile, biome).expect("set");
        }
        assert_support_rules(&b);
    }

    let after: Vec<Terrain> = b.tiles().iter().map(|t| t.terrain()).collect();
    assert_eq!(after, terrains);

    // Strengths only depend on the current biomes and claims
    let before = snapshot(&b);
    b.refresh().expect("graph built");
    assert_eq!(snapshot(&b), before);
}
