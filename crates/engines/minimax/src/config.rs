use std::time::Duration;

use stratego_core::Difficulty;

/// Search parameters for one difficulty tier.
///
/// The beam widths bound the branching factor: moves are ordered by the fast
/// tactical score and only the top slice is searched. Node and time budgets
/// are soft caps checked once per node.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Search depth in plies.
    pub depth: u8,
    /// Candidate moves kept at the root.
    pub root_beam_width: usize,
    /// Candidate moves kept at every deeper node.
    pub child_beam_width: usize,
    /// Node budget for the whole decision.
    pub max_nodes: u64,
    /// Soft wall-clock budget for the whole decision.
    pub time_budget: Duration,
    /// How many top root moves the exploration sampler may pick from.
    pub explore_top_moves: usize,
    /// Probability of sampling among the top moves instead of playing the
    /// best one. Adds variability at the lower tiers.
    pub exploration_chance: f64,
}

impl SearchConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> SearchConfig {
        match difficulty {
            Difficulty::Medium => SearchConfig {
                depth: 1,
                root_beam_width: 14,
                child_beam_width: 10,
                max_nodes: 1000,
                time_budget: Duration::from_millis(180),
                explore_top_moves: 4,
                exploration_chance: 0.3,
            },
            Difficulty::Hard => SearchConfig {
                depth: 2,
                root_beam_width: 18,
                child_beam_width: 14,
                max_nodes: 5500,
                time_budget: Duration::from_millis(650),
                explore_top_moves: 3,
                exploration_chance: 0.1,
            },
            Difficulty::Extreme => SearchConfig {
                depth: 3,
                root_beam_width: 24,
                child_beam_width: 16,
                max_nodes: 14_000,
                time_budget: Duration::from_millis(1500),
                explore_top_moves: 1,
                exploration_chance: 0.0,
            },
        }
    }
}
