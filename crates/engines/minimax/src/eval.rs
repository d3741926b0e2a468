//! Static position evaluation.
//!
//! A weighted sum of independent terms, each computed for both sides and
//! combined as (mine - theirs) x weight. Positive favors `perspective`.

use stratego_core::{
    center_distance, forward_progress, generate_moves, resolve_combat, CombatResult, GameState,
    Piece, Rank, TeamColor, DIRECTIONS,
};

const MOBILITY_WEIGHT: f64 = 18.0;
const PROGRESSION_WEIGHT: f64 = 6.0;
const CENTER_WEIGHT: f64 = 10.0;
const FLAG_SAFETY_WEIGHT: f64 = 28.0;
const FLAG_PRESSURE_WEIGHT: f64 = 22.0;

/// Evaluates the position from `perspective`'s point of view.
pub fn evaluate(state: &GameState, perspective: TeamColor) -> f64 {
    let mine = state.pieces(perspective);
    let theirs = state.pieces(perspective.other());

    let my_flag = find_flag(mine);
    let opp_flag = find_flag(theirs);

    let material = side_material(mine) - side_material(theirs);

    let my_moves = generate_moves(state, perspective).len() as f64;
    let opp_moves = generate_moves(state, perspective.other()).len() as f64;
    let mobility = (my_moves - opp_moves) * MOBILITY_WEIGHT;

    let progression =
        progression_score(mine, perspective) - progression_score(theirs, perspective.other());
    let center = center_control_score(mine) - center_control_score(theirs);
    let flag_safety = flag_safety_score(my_flag, mine) - flag_safety_score(opp_flag, theirs);
    let pressure = flag_pressure_score(mine, opp_flag, perspective)
        - flag_pressure_score(theirs, my_flag, perspective.other());
    let tactical = immediate_threat_score(mine, theirs);

    material
        + mobility
        + progression * PROGRESSION_WEIGHT
        + center * CENTER_WEIGHT
        + flag_safety * FLAG_SAFETY_WEIGHT
        + pressure * FLAG_PRESSURE_WEIGHT
        + tactical
}

fn find_flag(pieces: &[Piece]) -> Option<&Piece> {
    pieces.iter().find(|p| p.rank == Rank::Flag)
}

fn is_high_rank(rank: Rank) -> bool {
    matches!(rank, Rank::Colonel | Rank::General | Rank::Marshal)
}

/// Material plus a small concealment bonus for hidden high ranks.
fn side_material(pieces: &[Piece]) -> f64 {
    let mut total = 0.0;
    for piece in pieces {
        total += piece.rank.material_value() as f64;
        if !piece.revealed && is_high_rank(piece.rank) {
            total += 8.0;
        }
    }
    total
}

/// Forward advancement of movable pieces, weighted toward the low ranks
/// expected to probe (scouts, miners).
fn progression_score(pieces: &[Piece], color: TeamColor) -> f64 {
    let mut score = 0.0;
    for piece in pieces {
        if !piece.rank.is_movable() {
            continue;
        }
        let progress = forward_progress(color, piece.row) as f64;
        let rank_weight = if piece.rank.strength() <= Rank::Miner.strength() {
            1.0
        } else {
            0.65
        };
        score += progress * rank_weight;
    }
    score
}

fn center_control_score(pieces: &[Piece]) -> f64 {
    let mut score = 0.0;
    for piece in pieces {
        let contribution = (4.8 - center_distance(piece.row, piece.col)).max(0.0);
        if piece.rank.is_movable() {
            score += contribution;
        } else {
            score += contribution * 0.3;
        }
    }
    score
}

/// Adjacent defenders scaled by strength, plus a bonus for an edge or
/// corner flag placement. Losing the flag entirely is scored far below any
/// placement.
fn flag_safety_score(flag: Option<&Piece>, pieces: &[Piece]) -> f64 {
    let Some(flag) = flag else {
        return -100.0;
    };

    let mut score = 0.0;
    for (dr, dc) in DIRECTIONS {
        let row = flag.row as i8 + dr;
        let col = flag.col as i8 + dc;
        let Some(adjacent) = pieces
            .iter()
            .find(|p| p.row as i8 == row && p.col as i8 == col)
        else {
            continue;
        };
        if adjacent.rank == Rank::Bomb {
            score += 2.4;
        } else if adjacent.rank.strength() >= Rank::Major.strength() {
            score += 1.2;
        } else if adjacent.rank.strength() >= Rank::Sergeant.strength() {
            score += 0.6;
        }
    }

    if flag.row == 0 || flag.row == 9 {
        score += 0.9;
    }
    if flag.col == 0 || flag.col == 9 {
        score += 0.7;
    }
    score
}

/// Movable pieces near the enemy flag, with extra weight inside three cells
/// and for incursions into the opponent's half.
fn flag_pressure_score(pieces: &[Piece], enemy_flag: Option<&Piece>, color: TeamColor) -> f64 {
    let Some(flag) = enemy_flag else {
        return 0.0;
    };

    let mut best_distance = f64::INFINITY;
    let mut pressure = 0.0;

    for piece in pieces {
        if !piece.rank.is_movable() {
            continue;
        }
        let distance = (piece.row as f64 - flag.row as f64).abs()
            + (piece.col as f64 - flag.col as f64).abs();
        best_distance = best_distance.min(distance);

        if distance <= 3.0 {
            pressure += if piece.rank.strength() >= Rank::Captain.strength() {
                2.4
            } else {
                1.2
            };
        }

        let incursion = match color {
            TeamColor::Red => piece.row <= 3,
            TeamColor::Blue => piece.row >= 6,
        };
        if incursion {
            pressure += 0.35;
        }
    }

    if !best_distance.is_finite() {
        return pressure;
    }
    pressure + (9.0 - best_distance).max(0.0) * 0.6
}

/// 1-ply static proxy for hanging captures: a fraction of the material swing
/// for every attack available right now. Not a search, just leaf refinement.
fn immediate_threat_score(mine: &[Piece], theirs: &[Piece]) -> f64 {
    let mut score = 0.0;
    for piece in mine {
        if !piece.rank.is_movable() {
            continue;
        }
        for (dr, dc) in DIRECTIONS {
            let row = piece.row as i8 + dr;
            let col = piece.col as i8 + dc;
            let Some(enemy) = theirs
                .iter()
                .find(|p| p.row as i8 == row && p.col as i8 == col)
            else {
                continue;
            };

            match resolve_combat(piece.rank, enemy.rank) {
                CombatResult::AttackerWins => {
                    score += enemy.rank.material_value() as f64 * 0.05;
                }
                CombatResult::DefenderWins
                    if enemy.rank.strength() >= Rank::Major.strength() =>
                {
                    score -= piece.rank.material_value() as f64 * 0.03;
                }
                _ => {}
            }
        }
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
