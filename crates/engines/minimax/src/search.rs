//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search is a pure function of (state, color, config): all mutable
//! bookkeeping lives in an explicit `SearchContext` threaded through the
//! recursion. Budgets are soft, checked once per node; exceeding one is not
//! an error, the node just falls back to the static evaluation.

use std::time::Instant;

use neural_eval::ModelHandle;
use rand::Rng;
use stratego_core::{generate_moves, GameState, GameStatus, Move, TeamColor};
use tracing::debug;

use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::ordering::order_moves;

/// Terminal score for a finished game, shrunk by the remaining depth so the
/// search prefers faster wins and slower losses.
const WIN_SCORE: f64 = 80_000.0;
/// Terminal score when a side is left without a legal move.
const NO_MOVES_SCORE: f64 = 70_000.0;
/// Temperature of the root exploration sampler.
const EXPLORATION_TEMPERATURE: f64 = 180.0;

/// Mutable search bookkeeping, threaded explicitly through the recursion.
pub struct SearchContext {
    pub config: SearchConfig,
    started_at: Instant,
    pub nodes: u64,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> SearchContext {
        SearchContext {
            config,
            started_at: Instant::now(),
            nodes: 0,
        }
    }

    /// Soft budget check, evaluated once per node.
    fn should_cut(&self) -> bool {
        if self.nodes >= self.config.max_nodes {
            return true;
        }
        self.started_at.elapsed() >= self.config.time_budget
    }
}

/// Outcome of a root search.
pub struct SearchOutcome {
    /// The chosen move with its score (None if no legal moves exist).
    pub best_move: Option<(Move, f64)>,
    /// Nodes evaluated.
    pub nodes: u64,
    /// True if the node or time budget was hit.
    pub stopped: bool,
}

/// Searches the position and picks a move for `color`.
///
/// At the lower tiers the pick is occasionally sampled among the top root
/// moves with exponentially decaying weights, which adds variability without
/// ever preferring a clearly losing move when the score gap is large.
pub fn search_root(
    state: &GameState,
    color: TeamColor,
    config: SearchConfig,
    model: &ModelHandle,
    rng: &mut impl Rng,
) -> SearchOutcome {
    if state.status != GameStatus::Playing || state.current_turn != color {
        return SearchOutcome {
            best_move: None,
            nodes: 0,
            stopped: false,
        };
    }

    let all_moves = generate_moves(state, color);
    if all_moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            nodes: 0,
            stopped: false,
        };
    }

    let mut context = SearchContext::new(config);
    let ordered = order_moves(state, all_moves, color, color, config.root_beam_width);

    let mut scored: Vec<(Move, f64)> = ordered
        .into_iter()
        .map(|mv| {
            let next = state.apply_move_unchecked(color, &mv).state;
            let score = minimax(
                &next,
                config.depth.saturating_sub(1),
                color.other(),
                color,
                f64::NEG_INFINITY,
                f64::INFINITY,
                &mut context,
                model,
            );
            (mv, score)
        })
        .collect();

    scored.sort_by(|left, right| {
        right
            .1
            .partial_cmp(&left.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let stopped = context.should_cut();
    if stopped {
        debug!(
            nodes = context.nodes,
            "search budget hit, using best move found so far"
        );
    }

    let chosen = explore_or_best(&scored, config, rng);
    SearchOutcome {
        best_move: Some(chosen),
        nodes: context.nodes,
        stopped,
    }
}

/// Either the best-scored move, or (with tier-configured probability) a
/// weighted sample among the top few.
fn explore_or_best(
    scored: &[(Move, f64)],
    config: SearchConfig,
    rng: &mut impl Rng,
) -> (Move, f64) {
    if config.explore_top_moves > 1
        && config.exploration_chance > 0.0
        && rng.gen::<f64>() < config.exploration_chance
    {
        let options = &scored[..config.explore_top_moves.min(scored.len())];
        let best_score = options[0].1;
        let weights: Vec<f64> = options
            .iter()
            .map(|(_, score)| ((score - best_score) / EXPLORATION_TEMPERATURE).exp())
            .collect();
        let total: f64 = weights.iter().sum();
        let mut pick = rng.gen::<f64>() * total;

        for (option, weight) in options.iter().zip(&weights) {
            pick -= weight;
            if pick <= 0.0 {
                return *option;
            }
        }
    }

    scored[0]
}

/// Alpha-beta minimax. `depth` counts down; scores are always from
/// `maximizing`'s perspective.
#[allow(clippy::too_many_arguments)]
fn minimax(
    state: &GameState,
    depth: u8,
    active: TeamColor,
    maximizing: TeamColor,
    mut alpha: f64,
    mut beta: f64,
    context: &mut SearchContext,
    model: &ModelHandle,
) -> f64 {
    context.nodes += 1;

    if state.status == GameStatus::Finished {
        return match state.winner {
            None => 0.0,
            Some(winner) if winner == maximizing => WIN_SCORE - depth as f64,
            Some(_) => -WIN_SCORE + depth as f64,
        };
    }

    if depth == 0 || context.should_cut() {
        return leaf_score(state, maximizing, model);
    }

    let moves = generate_moves(state, active);
    if moves.is_empty() {
        // Running out of moves loses, so a silent opponent is near-certain
        // victory for the other side.
        return if active == maximizing {
            -NO_MOVES_SCORE
        } else {
            NO_MOVES_SCORE
        };
    }

    let ordered = order_moves(
        state,
        moves,
        active,
        maximizing,
        context.config.child_beam_width,
    );

    if active == maximizing {
        let mut value = f64::NEG_INFINITY;
        for mv in ordered {
            let next = state.apply_move_unchecked(active, &mv).state;
            value = value.max(minimax(
                &next,
                depth - 1,
                active.other(),
                maximizing,
                alpha,
                beta,
                context,
                model,
            ));
            alpha = alpha.max(value);
            if beta <= alpha {
                break;
            }
        }
        value
    } else {
        let mut value = f64::INFINITY;
        for mv in ordered {
            let next = state.apply_move_unchecked(active, &mv).state;
            value = value.min(minimax(
                &next,
                depth - 1,
                active.other(),
                maximizing,
                alpha,
                beta,
                context,
                model,
            ));
            beta = beta.min(value);
            if beta <= alpha {
                break;
            }
        }
        value
    }
}

/// Static score at a leaf or budget cutoff: the heuristic blended with the
/// learned model.
fn leaf_score(state: &GameState, maximizing: TeamColor, model: &ModelHandle) -> f64 {
    let heuristic = evaluate(state, maximizing);
    model.blend(state, maximizing, heuristic)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
