//! Fast tactical move ordering.
//!
//! Every node orders its candidate moves by a cheap tactical score and keeps
//! only the top beam before recursing, which bounds the branching factor in
//! a 40-piece game. Flag captures sort first, then favorable captures by
//! expected material swing, then forward progress and centralization.

use stratego_core::{
    center_distance, is_edge, resolve_combat, CombatResult, GameState, GameStatus, Move, Rank,
    TeamColor,
};

/// Orders `moves` best-first for `active` and truncates to `beam_width`.
pub fn order_moves(
    state: &GameState,
    moves: Vec<Move>,
    active: TeamColor,
    maximizing: TeamColor,
    beam_width: usize,
) -> Vec<Move> {
    let mut scored: Vec<(Move, f64)> = moves
        .into_iter()
        .map(|mv| {
            let score = tactical_move_score(state, &mv, active, maximizing);
            (mv, score)
        })
        .collect();

    scored.sort_by(|left, right| {
        right
            .1
            .partial_cmp(&left.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(beam_width);
    scored.into_iter().map(|(mv, _)| mv).collect()
}

/// Static priority of a single move. Negated for the minimizing side so the
/// sort always puts that side's strongest replies first.
pub fn tactical_move_score(
    state: &GameState,
    mv: &Move,
    active: TeamColor,
    maximizing: TeamColor,
) -> f64 {
    let mut score = 0.0;

    if mv.is_attack {
        if let Some(defender_rank) = mv.defender_rank {
            let attacker_value = mv.attacker_rank.material_value() as f64;
            let defender_value = defender_rank.material_value() as f64;
            if defender_rank == Rank::Flag {
                score += 120_000.0;
            } else {
                match resolve_combat(mv.attacker_rank, defender_rank) {
                    CombatResult::AttackerWins => {
                        score += defender_value - attacker_value * 0.2;
                    }
                    CombatResult::BothDie => {
                        score += (defender_value - attacker_value) * 0.45;
                    }
                    CombatResult::DefenderWins => {
                        score -= attacker_value * 0.95;
                    }
                }
            }
        }
    }

    // Forward progress, weighted toward the probing ranks.
    let row_delta = match active {
        TeamColor::Red => mv.from_row as f64 - mv.to_row as f64,
        TeamColor::Blue => mv.to_row as f64 - mv.from_row as f64,
    };
    score += row_delta
        * if mv.attacker_rank.strength() <= Rank::Miner.strength() {
            4.2
        } else {
            2.7
        };

    // Centralization.
    let before = center_distance(mv.from_row, mv.from_col);
    let after = center_distance(mv.to_row, mv.to_col);
    score += (before - after) * 1.6;

    // Keep the top brass off the rim.
    if mv.attacker_rank.strength() >= Rank::General.strength() && is_edge(mv.to_row, mv.to_col) {
        score -= 8.0;
    }

    if mv.attacker_rank == Rank::Miner && mv.is_attack && mv.defender_rank == Some(Rank::Bomb) {
        score += 32.0;
    }

    // A move that ends the game in the mover's favor outranks everything.
    let applied = state.apply_move_unchecked(active, mv);
    if applied.state.status == GameStatus::Finished && applied.state.winner == Some(active) {
        score += 140_000.0;
    }

    if active == maximizing {
        score
    } else {
        -score
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
