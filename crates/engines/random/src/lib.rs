//! Random Move Stratego Engine
//!
//! A simple engine that selects moves uniformly at random from all legal
//! moves. Useful for:
//! - Testing infrastructure before wiring in real engines
//! - Baseline comparisons (any real engine should easily beat this)
//! - Stress testing move generation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use stratego_core::{generate_moves, Engine, GameState, SearchResult, TeamColor};


/// An engine that plays random legal moves.
///
/// This engine provides no evaluation - it simply picks a random move from
/// all available legal moves, on its own injected RNG so matches stay
/// reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    nodes: u64,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, state: &GameState, color: TeamColor) -> SearchResult {
        let moves = generate_moves(state, color);
        self.nodes = 1;

        SearchResult {
            best_move: moves.choose(&mut self.rng).copied(),
            score: 0.0,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
