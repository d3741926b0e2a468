//! Feature extraction for the learned evaluator.
//!
//! Converts a game state into the canonical 27-feature vector the training
//! pipeline was built around. Every feature is a normalized difference (own
//! minus opponent) so the vector is antisymmetric in the perspective, and the
//! name list must match a model artifact's `featureNames` exactly, in order.

use stratego_core::{
    center_distance, forward_progress, GameState, Piece, Rank, TeamColor, BOARD_SIZE, DIRECTIONS,
};

pub const NUM_FEATURES: usize = 27;

/// Canonical feature names, in extraction order. Model artifacts are
/// validated against this exact list.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "rank_balance_0",
    "rank_balance_1",
    "rank_balance_2",
    "rank_balance_3",
    "rank_balance_4",
    "rank_balance_5",
    "rank_balance_6",
    "rank_balance_7",
    "rank_balance_8",
    "rank_balance_9",
    "rank_balance_10",
    "rank_balance_11",
    "material_value_diff",
    "movable_piece_diff",
    "scout_diff",
    "miner_diff",
    "bomb_diff",
    "high_rank_diff",
    "revealed_ratio_diff",
    "hidden_high_rank_diff",
    "advancement_diff",
    "frontline_diff",
    "center_control_diff",
    "flag_guard_diff",
    "flag_pressure_diff",
    "turn_advantage",
    "game_phase",
];

/// Extracts the feature vector from `perspective`'s point of view.
pub fn extract_features(state: &GameState, perspective: TeamColor) -> Vec<f64> {
    let mine = state.pieces(perspective);
    let theirs = state.pieces(perspective.other());

    let my_counts = rank_counts(mine);
    let opp_counts = rank_counts(theirs);

    let mut features = Vec::with_capacity(NUM_FEATURES);

    for rank in Rank::ALL {
        let idx = rank.strength() as usize;
        let max_count = rank.count_in_setup() as f64;
        features.push((my_counts[idx] as f64 - opp_counts[idx] as f64) / max_count);
    }

    features.push((material(mine) - material(theirs)) / max_material_per_side());
    features.push((movable_count(mine) as f64 - movable_count(theirs) as f64) / 33.0);
    features.push(
        (my_counts[Rank::Scout.strength() as usize] as f64
            - opp_counts[Rank::Scout.strength() as usize] as f64)
            / 8.0,
    );
    features.push(
        (my_counts[Rank::Miner.strength() as usize] as f64
            - opp_counts[Rank::Miner.strength() as usize] as f64)
            / 5.0,
    );
    features.push(
        (my_counts[Rank::Bomb.strength() as usize] as f64
            - opp_counts[Rank::Bomb.strength() as usize] as f64)
            / 6.0,
    );
    features.push((high_rank_count(mine) as f64 - high_rank_count(theirs) as f64) / 4.0);
    features.push(revealed_ratio(mine) - revealed_ratio(theirs));
    features
        .push((hidden_high_rank_count(mine) as f64 - hidden_high_rank_count(theirs) as f64) / 4.0);
    features.push(advancement(mine, perspective) - advancement(theirs, perspective.other()));
    features.push(
        (frontline_presence(mine, perspective) as f64
            - frontline_presence(theirs, perspective.other()) as f64)
            / 20.0,
    );
    features.push((center_control(mine) - center_control(theirs)) / 30.0);
    features.push((flag_guard(mine) - flag_guard(theirs)) / 8.0);
    features.push(flag_pressure(mine, find_flag(theirs)) - flag_pressure(theirs, find_flag(mine)));
    features.push(if state.current_turn == perspective {
        1.0
    } else {
        -1.0
    });
    features.push(game_phase(state.turn_number));

    debug_assert_eq!(features.len(), NUM_FEATURES);
    features
}

/// Smooth game-phase indicator: roughly -1 in the opening, saturating toward
/// +1 in long endgames.
pub fn game_phase(turn_number: u32) -> f64 {
    ((turn_number as f64 - 42.0) / 35.0).tanh()
}

fn rank_counts(pieces: &[Piece]) -> [usize; 12] {
    let mut counts = [0usize; 12];
    for piece in pieces {
        counts[piece.rank.strength() as usize] += 1;
    }
    counts
}

fn is_high_rank(rank: Rank) -> bool {
    matches!(rank, Rank::Colonel | Rank::General | Rank::Marshal)
}

fn material(pieces: &[Piece]) -> f64 {
    let mut total = 0.0;
    for piece in pieces {
        total += piece.rank.material_value() as f64;
        if !piece.revealed && is_high_rank(piece.rank) {
            total += 8.0;
        }
    }
    total
}

fn max_material_per_side() -> f64 {
    Rank::ALL
        .iter()
        .map(|rank| rank.material_value() as f64 * rank.count_in_setup() as f64)
        .sum()
}

fn movable_count(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|p| p.rank.is_movable()).count()
}

fn high_rank_count(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|p| is_high_rank(p.rank)).count()
}

fn hidden_high_rank_count(pieces: &[Piece]) -> usize {
    pieces
        .iter()
        .filter(|p| !p.revealed && is_high_rank(p.rank))
        .count()
}

fn revealed_ratio(pieces: &[Piece]) -> f64 {
    if pieces.is_empty() {
        return 0.0;
    }
    pieces.iter().filter(|p| p.revealed).count() as f64 / pieces.len() as f64
}

fn advancement(pieces: &[Piece], color: TeamColor) -> f64 {
    let movable: Vec<&Piece> = pieces.iter().filter(|p| p.rank.is_movable()).collect();
    if movable.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for piece in &movable {
        let progress = forward_progress(color, piece.row) as f64 / (BOARD_SIZE - 1) as f64;
        let weight = if piece.rank.strength() <= Rank::Miner.strength() {
            1.0
        } else {
            0.7
        };
        total += progress * weight;
    }
    total / movable.len() as f64
}

fn frontline_presence(pieces: &[Piece], color: TeamColor) -> usize {
    pieces
        .iter()
        .filter(|p| p.rank.is_movable())
        .filter(|p| match color {
            TeamColor::Red => p.row <= 4,
            TeamColor::Blue => p.row >= 5,
        })
        .count()
}

fn center_control(pieces: &[Piece]) -> f64 {
    let mut total = 0.0;
    for piece in pieces {
        let contribution = (4.8 - center_distance(piece.row, piece.col)).max(0.0);
        if piece.rank.is_movable() {
            total += contribution;
        } else {
            total += contribution * 0.3;
        }
    }
    total
}

fn find_flag(pieces: &[Piece]) -> Option<&Piece> {
    pieces.iter().find(|p| p.rank == Rank::Flag)
}

fn flag_guard(pieces: &[Piece]) -> f64 {
    let Some(flag) = find_flag(pieces) else {
        return -2.0;
    };

    let mut guard = 0.0;
    for (dr, dc) in DIRECTIONS {
        let row = flag.row as i8 + dr;
        let col = flag.col as i8 + dc;
        let Some(neighbor) = pieces
            .iter()
            .find(|p| p.row as i8 == row && p.col as i8 == col)
        else {
            continue;
        };
        guard += match neighbor.rank {
            Rank::Bomb => 2.0,
            rank if rank.strength() >= Rank::Major.strength() => 1.1,
            rank if rank.strength() >= Rank::Sergeant.strength() => 0.6,
            _ => 0.3,
        };
    }

    if flag.row == 0 || flag.row == BOARD_SIZE - 1 {
        guard += 0.6;
    }
    if flag.col == 0 || flag.col == BOARD_SIZE - 1 {
        guard += 0.4;
    }
    guard
}

fn flag_pressure(pieces: &[Piece], enemy_flag: Option<&Piece>) -> f64 {
    let Some(flag) = enemy_flag else {
        return 0.0;
    };

    let movable: Vec<&Piece> = pieces.iter().filter(|p| p.rank.is_movable()).collect();
    if movable.is_empty() {
        return -1.0;
    }

    let mut total = 0.0;
    let mut best_distance = f64::INFINITY;
    for piece in &movable {
        let distance = (piece.row as f64 - flag.row as f64).abs()
            + (piece.col as f64 - flag.col as f64).abs();
        best_distance = best_distance.min(distance);
        total += 1.0 / (distance + 1.0);
    }

    let average = total / movable.len() as f64;
    let closest = 1.0 / (best_distance + 1.0);
    average * 0.6 + closest * 0.4
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
