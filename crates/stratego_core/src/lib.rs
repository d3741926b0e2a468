pub mod board;
pub mod combat;
pub mod movegen;
pub mod setup;
pub mod state;
pub mod types;
pub mod view;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use combat::resolve_combat;
pub use movegen::*;
pub use setup::{canonical_ranks, generate_setup, validate_setup, SetupMode};
pub use state::*;
pub use types::*;
pub use view::{to_public_view, PublicGameState, PublicHistoryEntry, PublicPiece, UNKNOWN_RANK};

// =============================================================================
// Engine trait — implemented by all Stratego engines (minimax, random, etc.)
// =============================================================================

/// Result of a move decision.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move (None if the side has no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score of the chosen move from the mover's perspective
    pub score: f64,
    /// Number of nodes evaluated (for stats)
    pub nodes: u64,
    /// Whether the search hit its node or time budget
    pub stopped: bool,
}

/// Trait that all Stratego engines must implement.
///
/// This allows swapping between the alpha-beta engine, the random baseline,
/// and future approaches behind one interface.
pub trait Engine: Send {
    /// Decide a move for `color` on the given state.
    fn choose_move(&mut self, state: &GameState, color: TeamColor) -> SearchResult;

    /// Returns the engine's name for identification.
    fn name(&self) -> &str;

    /// Reset internal state for a new game (counters, caches, etc.)
    fn new_game(&mut self) {}
}
