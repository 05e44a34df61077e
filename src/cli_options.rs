/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers creating puzzles. They load a puzzle, assign biomes,
//! and print the resulting board and puzzle check.
//!
//! # Examples
//!
//! List the available puzzles:
//!
//! ```text
//! $ hexbiome --ls
//! Crossing easy
//! Crossing hard
//! Dunes medium
//! ```
//!
//! Try a solution for the easy Crossing puzzle:
//!
//! ```text
//! $ hexbiome -p Crossing -f easy --place 1,1=forest --place 2,1=forest --place 3,1=forest \
//!       --place 0,0=glacier --check
//! Wg+ W-+ W-+ W-+ W-+
//!   Mc+ Pf+ Pf+ Pf+ Mc!
//! Verdict: PassWithWeakLinks(1)
//! Path: (0,1) (1,1) (2,1) (3,1) (4,1)
//! Fragile: (4,1)
//! ```
//!
//! In the board output, each tile is the terrain, the biome, and the strength (`+` strong, `!`
//! weak, `x` bad).

use clap::{Parser, ValueEnum};
use log::debug;
use rand::rngs::ThreadRng;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::path::PathBuf;

use hexbiome::board::layout::HexLayout;
use hexbiome::board::terrain::Biome;
use hexbiome::board::tile::TileId;
use hexbiome::presenter::LogPresenter;
use hexbiome::puzzles::{self, Difficulty, PuzzleDefinition};
use hexbiome::session::{DiceOutcome, PuzzleSession, Verdict, roll_dice};

/// Parse a `X,Y` tile coordinate.
fn parse_tile(s: &str) -> Result<TileId, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x: i32 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid X coordinate in '{s}'"))?;
    let y: i32 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid Y coordinate in '{s}'"))?;
    Ok(TileId::new(x, y))
}

/// Parse a `X,Y=BIOME` biome assignment.
fn parse_placement(s: &str) -> Result<(TileId, Biome), String> {
    let (tile, biome) = s
        .split_once('=')
        .ok_or_else(|| format!("expected X,Y=BIOME but got '{s}'"))?;
    let biome: Biome = Biome::from_str(biome.trim(), true)?;
    Ok((parse_tile(tile)?, biome))
}

/// Try Hexbiome puzzles from the command line.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// List the puzzles
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Name of the built-in puzzle to load
    #[arg(short, long, group = "source")]
    puzzle: Option<String>,

    /// Difficulty level for the puzzle
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Load the puzzle from a JSON file
    #[arg(long, group = "source")]
    file: Option<PathBuf>,

    /// Assign a biome to a tile (X,Y=BIOME). Can be repeated
    #[arg(long, value_parser = parse_placement)]
    place: Vec<(TileId, Biome)>,

    /// Clear the biome of a tile (X,Y). Can be repeated
    #[arg(long, value_parser = parse_tile)]
    clear: Vec<TileId>,

    /// Check the puzzle after the biomes are assigned
    #[arg(short, long, default_value_t = false)]
    check: bool,

    /// Dice roll for the first fragile tile of the check (1 to 6)
    #[arg(long, requires = "check", value_parser = clap::value_parser!(u8).range(1..=6))]
    roll: Option<u8>,

    /// Roll the dice for the first fragile tile of the check
    #[arg(long, requires = "check", conflicts_with = "roll", default_value_t = false)]
    roll_random: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options.
///
/// Return the exit code, or None when no puzzle is requested.
pub fn parse() -> Option<u8> {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the puzzles
    //
    if args.ls {
        let mut names: Vec<(String, Difficulty)> = puzzles::puzzle_map().into_keys().collect();
        names.sort();
        for (name, difficulty) in names {
            println!("{name} {difficulty}");
        }
        return Some(0);
    }

    if args.puzzle.is_none() && args.file.is_none() {
        return None;
    }

    match run(&args) {
        Ok(Some(Verdict::Fail)) => Some(2),
        Ok(_) => Some(0),
        Err(e) => {
            eprintln!("Error: {e}");
            Some(1)
        }
    }
}

/// Load the puzzle and apply the requested actions.
fn run(args: &Args) -> Result<Option<Verdict>, Box<dyn Error>> {
    let definition: PuzzleDefinition = match (&args.puzzle, &args.file) {
        (_, Some(path)) => PuzzleDefinition::load_from_path(path)?,
        (Some(name), None) => {
            let mut puzzle_hash: HashMap<(String, Difficulty), PuzzleDefinition> =
                puzzles::puzzle_map();
            puzzle_hash
                .remove(&(name.clone(), args.difficulty))
                .ok_or_else(|| {
                    format!(
                        "unknown puzzle {name} {}. Use --ls to list the available puzzles.",
                        args.difficulty
                    )
                })?
        }
        (None, None) => return Ok(None),
    };

    let mut session: PuzzleSession<LogPresenter, LogPresenter> =
        definition.build_session(&HexLayout::default(), LogPresenter, LogPresenter)?;

    for (tile, biome) in &args.place {
        debug!("Placing {biome} on {tile}");
        session.assign_biome(*tile, *biome)?;
    }
    for tile in &args.clear {
        debug!("Clearing {tile}");
        session.clear_biome(*tile)?;
    }

    if !args.check {
        print!("{}", session.board().to_ascii());
        return Ok(None);
    }

    let verdict: Verdict = session.check_puzzle()?;
    if let Some(&fragile) = session.weak_tiles().first() {
        let roll: Option<u8> = if args.roll_random {
            let mut rng: ThreadRng = rand::rng();
            Some(roll_dice(&mut rng))
        } else {
            args.roll
        };
        if let Some(roll) = roll {
            session.begin_dice_roll(fragile)?;
            let outcome: DiceOutcome = session.resolve_dice_roll(roll)?;
            println!("Dice roll for {fragile}: {roll} ({outcome:?})");
        }
    }

    print!("{}", session.board().to_ascii());
    println!("Verdict: {verdict:?}");
    let path: Vec<String> = session
        .last_path()
        .get()
        .iter()
        .map(|t| t.to_string())
        .collect();
    println!("Path: {}", path.join(" "));
    if !session.weak_tiles().is_empty() {
        let weak: Vec<String> = session.weak_tiles().iter().map(|t| t.to_string()).collect();
        println!("Fragile: {}", weak.join(" "));
    }
    if session.is_game_over() {
        println!("Game over");
    }
    Ok(Some(verdict))
}
