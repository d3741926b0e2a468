//! Setup generation: full 40-piece placements for one side.
//!
//! Every mode emits exactly the canonical rank multiset onto the side's four
//! home rows, one piece per cell. The strategic modes share four placement
//! passes — flag concealment, bomb shielding, scout/miner lane seeding, and
//! rear-guard placement for the high ranks — and differ in ordering and
//! intensity.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{home_rows, in_bounds, BOARD_SIZE, DIRECTIONS};
use crate::types::{Difficulty, Piece, PieceId, Rank, TeamColor};

/// Placement style for a generated side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupMode {
    /// Uniform shuffle of the rank multiset over the home rows.
    Random,
    /// Corner/edge flag behind a 3-bomb shield, probing lanes, rear guard.
    Shielded,
    /// Lane-first variant: scout and miner lanes are stocked before the
    /// bomb shield so the probing ranks always reach their cells.
    Aggressive,
    /// Hardest tier: corner-biased flag, 4-bomb shield plus decoy bombs,
    /// extended rear guard.
    Fortified,
}

impl SetupMode {
    /// Tier mapping: Medium plays a random placement, Hard alternates the
    /// two standard strategic variants, Extreme always fortifies.
    pub fn for_difficulty(difficulty: Difficulty, rng: &mut impl Rng) -> SetupMode {
        match difficulty {
            Difficulty::Medium => SetupMode::Random,
            Difficulty::Hard => {
                if rng.gen_bool(0.5) {
                    SetupMode::Shielded
                } else {
                    SetupMode::Aggressive
                }
            }
            Difficulty::Extreme => SetupMode::Fortified,
        }
    }
}

/// The canonical rank multiset of a full setup, 40 ranks.
pub fn canonical_ranks() -> Vec<Rank> {
    let mut ranks = Vec::with_capacity(40);
    for rank in Rank::ALL {
        for _ in 0..rank.count_in_setup() {
            ranks.push(rank);
        }
    }
    ranks
}

/// Generates a complete placement for `color` in the given mode.
pub fn generate_setup(color: TeamColor, mode: SetupMode, rng: &mut impl Rng) -> Vec<Piece> {
    let assignment = match mode {
        SetupMode::Random => random_assignment(rng),
        strategic => strategic_assignment(strategic, rng),
    };

    let pieces: Vec<Piece> = home_cells()
        .into_iter()
        .enumerate()
        .map(|(index, (row, col))| Piece {
            id: PieceId(index as u16),
            rank: assignment[cell_index(row, col)]
                .expect("setup generation left a home-row cell unassigned"),
            row: oriented_row(color, row),
            col,
            revealed: false,
        })
        .collect();

    debug_assert!(
        validate_setup(&pieces, color).is_ok(),
        "generated setup violates placement invariants"
    );
    pieces
}

/// Checks a placement against every setup invariant: 40 pieces, canonical
/// rank counts, unique ids, and every home-row cell covered exactly once.
pub fn validate_setup(pieces: &[Piece], color: TeamColor) -> Result<(), String> {
    if pieces.len() != 40 {
        return Err(format!("expected 40 pieces, got {}", pieces.len()));
    }

    let mut rank_counts = [0usize; 12];
    let mut seen_cells = [false; 40];
    let mut seen_ids = std::collections::HashSet::new();
    let (min_row, max_row) = home_rows(color);

    for piece in pieces {
        rank_counts[piece.rank.strength() as usize] += 1;
        if piece.row < min_row || piece.row > max_row || piece.col >= BOARD_SIZE {
            return Err(format!(
                "piece {:?} at ({}, {}) is outside the home rows",
                piece.id, piece.row, piece.col
            ));
        }
        let cell = (piece.row - min_row) as usize * BOARD_SIZE as usize + piece.col as usize;
        if seen_cells[cell] {
            return Err(format!("cell ({}, {}) assigned twice", piece.row, piece.col));
        }
        seen_cells[cell] = true;
        if !seen_ids.insert(piece.id) {
            return Err(format!("duplicate piece id {:?}", piece.id));
        }
    }

    for rank in Rank::ALL {
        let expected = rank.count_in_setup();
        let actual = rank_counts[rank.strength() as usize];
        if actual != expected {
            return Err(format!(
                "rank {:?} appears {} times, expected {}",
                rank, actual, expected
            ));
        }
    }

    Ok(())
}

// Strategic placement works in a canonical frame (rows 0-3, row 0 the back
// rank) and is mirrored for red at the end.

fn oriented_row(color: TeamColor, canonical_row: u8) -> u8 {
    match color {
        TeamColor::Blue => canonical_row,
        TeamColor::Red => BOARD_SIZE - 1 - canonical_row,
    }
}

fn home_cells() -> Vec<(u8, u8)> {
    let mut cells = Vec::with_capacity(40);
    for row in 0..4u8 {
        for col in 0..BOARD_SIZE {
            cells.push((row, col));
        }
    }
    cells
}

fn cell_index(row: u8, col: u8) -> usize {
    row as usize * BOARD_SIZE as usize + col as usize
}

fn random_assignment(rng: &mut impl Rng) -> [Option<Rank>; 40] {
    let mut ranks = canonical_ranks();
    ranks.shuffle(rng);

    let mut assignment = [None; 40];
    for ((row, col), rank) in home_cells().into_iter().zip(ranks) {
        assignment[cell_index(row, col)] = Some(rank);
    }
    assignment
}

fn strategic_assignment(mode: SetupMode, rng: &mut impl Rng) -> [Option<Rank>; 40] {
    let mut counts = [0usize; 12];
    for rank in Rank::ALL {
        counts[rank.strength() as usize] = rank.count_in_setup();
    }

    let mut assignment = [None; 40];

    place_flag(mode, &mut assignment, &mut counts, rng);
    let flag_cell = home_cells()
        .into_iter()
        .find(|&(row, col)| assignment[cell_index(row, col)] == Some(Rank::Flag))
        .expect("flag placement pass did not assign a flag");

    if mode == SetupMode::Aggressive {
        place_lanes(&mut assignment, &mut counts, rng);
        place_bomb_shield(mode, flag_cell, &mut assignment, &mut counts, rng);
    } else {
        place_bomb_shield(mode, flag_cell, &mut assignment, &mut counts, rng);
        if mode == SetupMode::Fortified {
            place_decoy_bombs(&mut assignment, &mut counts, rng);
        }
        place_lanes(&mut assignment, &mut counts, rng);
    }

    place_rear_guard(mode, &mut assignment, &mut counts, rng);
    fill_remaining(&mut assignment, &mut counts, rng);

    assignment
}

fn set_rank_at(
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    row: u8,
    col: u8,
    rank: Rank,
) {
    let remaining = &mut counts[rank.strength() as usize];
    if *remaining == 0 {
        return;
    }
    assignment[cell_index(row, col)] = Some(rank);
    *remaining -= 1;
}

fn place_flag(
    mode: SetupMode,
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    rng: &mut impl Rng,
) {
    let pool: &[(u8, u8)] = match mode {
        SetupMode::Fortified => &[(0, 0), (0, 9), (1, 1), (1, 8), (0, 4), (0, 5)],
        _ => &[(0, 0), (0, 9), (0, 4), (0, 5), (1, 1), (1, 8)],
    };
    let &(row, col) = pool.choose(rng).expect("flag pool is non-empty");
    set_rank_at(assignment, counts, row, col, Rank::Flag);
}

fn place_bomb_shield(
    mode: SetupMode,
    flag_cell: (u8, u8),
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    rng: &mut impl Rng,
) {
    let mut shield_cells: Vec<(u8, u8)> = DIRECTIONS
        .iter()
        .map(|&(dr, dc)| (flag_cell.0 as i8 + dr, flag_cell.1 as i8 + dc))
        .filter(|&(row, col)| in_bounds(row, col) && row <= 3)
        .map(|(row, col)| (row as u8, col as u8))
        .collect();
    shield_cells.shuffle(rng);

    let shield_count = if mode == SetupMode::Fortified { 4 } else { 3 };
    for &(row, col) in shield_cells.iter().take(shield_count) {
        if assignment[cell_index(row, col)].is_none() {
            set_rank_at(assignment, counts, row, col, Rank::Bomb);
        }
    }
}

fn place_decoy_bombs(
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    rng: &mut impl Rng,
) {
    let mut targets = [(0, 3), (0, 6), (1, 4), (1, 5), (2, 2), (2, 7)];
    targets.shuffle(rng);
    for &(row, col) in &targets {
        if counts[Rank::Bomb.strength() as usize] == 0 {
            break;
        }
        if assignment[cell_index(row, col)].is_none() {
            set_rank_at(assignment, counts, row, col, Rank::Bomb);
        }
    }
}

fn place_lanes(
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    rng: &mut impl Rng,
) {
    // Scouts on the wide front-row flanks and the central file openings.
    let mut scout_lanes = vec![
        (3, 0),
        (3, 1),
        (3, 2),
        (3, 3),
        (3, 6),
        (3, 7),
        (3, 8),
        (3, 9),
        (2, 4),
        (2, 5),
    ];
    scout_lanes.shuffle(rng);
    while counts[Rank::Scout.strength() as usize] > 0 {
        let Some((row, col)) = scout_lanes.pop() else {
            break;
        };
        if assignment[cell_index(row, col)].is_none() {
            set_rank_at(assignment, counts, row, col, Rank::Scout);
        }
    }

    // Miners on cells that feed the defusing lanes.
    let mut miner_cells = vec![
        (2, 0),
        (2, 1),
        (2, 8),
        (2, 9),
        (1, 3),
        (1, 6),
        (2, 4),
        (2, 5),
    ];
    miner_cells.shuffle(rng);
    while counts[Rank::Miner.strength() as usize] > 0 {
        let Some((row, col)) = miner_cells.pop() else {
            break;
        };
        if assignment[cell_index(row, col)].is_none() {
            set_rank_at(assignment, counts, row, col, Rank::Miner);
        }
    }
}

fn place_rear_guard(
    mode: SetupMode,
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    rng: &mut impl Rng,
) {
    let mut slots = vec![(1, 4), (1, 5), (0, 2), (0, 7), (1, 2), (1, 7)];
    let guard_ranks: &[Rank] = match mode {
        SetupMode::Fortified => &[
            Rank::Marshal,
            Rank::General,
            Rank::Colonel,
            Rank::Colonel,
            Rank::Major,
        ],
        _ => &[Rank::Marshal, Rank::General, Rank::Colonel, Rank::Major],
    };

    slots.shuffle(rng);
    for &rank in guard_ranks {
        if counts[rank.strength() as usize] == 0 {
            continue;
        }
        let Some((row, col)) = slots.pop() else {
            break;
        };
        if assignment[cell_index(row, col)].is_none() {
            set_rank_at(assignment, counts, row, col, rank);
        }
    }
}

fn fill_remaining(
    assignment: &mut [Option<Rank>; 40],
    counts: &mut [usize; 12],
    rng: &mut impl Rng,
) {
    let mut open_cells: Vec<(u8, u8)> = home_cells()
        .into_iter()
        .filter(|&(row, col)| assignment[cell_index(row, col)].is_none())
        .collect();
    open_cells.shuffle(rng);

    let mut leftover: Vec<Rank> = Vec::new();
    for rank in Rank::ALL {
        for _ in 0..counts[rank.strength() as usize] {
            leftover.push(rank);
        }
    }
    leftover.shuffle(rng);

    debug_assert_eq!(
        open_cells.len(),
        leftover.len(),
        "open cells and leftover ranks must match"
    );
    for ((row, col), rank) in open_cells.into_iter().zip(leftover) {
        assignment[cell_index(row, col)] = Some(rank);
        counts[rank.strength() as usize] -= 1;
    }
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod setup_tests;
