/*
main.rs

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

mod cli_options;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli_options::parse() {
        Some(ret) => ExitCode::from(ret),
        None => {
            eprintln!("No puzzle requested. Use --ls to list the puzzles, or --help.");
            ExitCode::from(1)
        }
    }
}
