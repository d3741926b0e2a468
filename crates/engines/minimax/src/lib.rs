//! Alpha-Beta Stratego Engine
//!
//! Depth-limited minimax with alpha-beta pruning over a beam-limited,
//! budgeted move ordering, parameterized per difficulty tier. Leaf positions
//! are scored by the hand-tuned heuristic blended with the learned model.
//!
//! The engine is stateless per decision: each call is a pure function of
//! (state, color, difficulty) plus the injected model handle and RNG, so
//! independent games can run concurrently with no shared state.

mod config;
mod eval;
mod ordering;
mod search;

use neural_eval::ModelHandle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stratego_core::{Difficulty, Engine, GameState, Move, SearchResult, TeamColor};

pub use config::SearchConfig;
pub use eval::evaluate;
pub use ordering::{order_moves, tactical_move_score};
pub use search::{search_root, SearchContext, SearchOutcome};

/// Decides a move for `color` at the given difficulty tier.
///
/// Returns None when the side has no legal moves or the game is not in
/// progress. The model handle is the injected learned evaluator; pass
/// `&ModelHandle::zeroed()` for heuristic-only play.
pub fn choose_move(
    state: &GameState,
    color: TeamColor,
    difficulty: Difficulty,
    model: &ModelHandle,
    rng: &mut impl Rng,
) -> Option<Move> {
    let config = SearchConfig::for_difficulty(difficulty);
    search_root(state, color, config, model, rng)
        .best_move
        .map(|(mv, _)| mv)
}

/// Alpha-beta engine bound to a difficulty tier, a model handle, and an RNG.
///
/// Production callers seed from entropy; tests construct seeded engines for
/// reproducible decisions.
pub struct MinimaxEngine {
    config: SearchConfig,
    model: ModelHandle,
    rng: StdRng,
    name: String,
}

impl MinimaxEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_model(difficulty, ModelHandle::zeroed())
    }

    pub fn with_model(difficulty: Difficulty, model: ModelHandle) -> Self {
        Self::build(difficulty, model, StdRng::from_entropy())
    }

    /// Fully deterministic engine for tests and reproducible matches.
    pub fn seeded(difficulty: Difficulty, model: ModelHandle, seed: u64) -> Self {
        Self::build(difficulty, model, StdRng::seed_from_u64(seed))
    }

    fn build(difficulty: Difficulty, model: ModelHandle, rng: StdRng) -> Self {
        let name = format!("Minimax-{:?}", difficulty);
        MinimaxEngine {
            config: SearchConfig::for_difficulty(difficulty),
            model,
            rng,
            name,
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }
}

impl Engine for MinimaxEngine {
    fn choose_move(&mut self, state: &GameState, color: TeamColor) -> SearchResult {
        let outcome = search_root(state, color, self.config, &self.model, &mut self.rng);
        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, score)| score).unwrap_or(0.0),
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
