//! Learned Stratego Evaluator
//!
//! This crate provides the learned half of the engine's evaluation: feature
//! extraction, the model artifact schema, and the confidence-weighted blend
//! that mixes a model score into the hand-tuned heuristic.
//!
//! # Model Loading
//!
//! Artifacts are produced by the offline training pipeline as JSON. Loading
//! never fails hard: a missing or invalid artifact is logged and replaced by
//! the zero model, which makes the blend a no-op (heuristic-only play).
//!
//! ```text
//! models/
//!   trained-model.json      linear (version 1) or MLP (version 2)
//! ```

pub mod features;
pub mod model;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use stratego_core::{GameState, TeamColor};

pub use features::{extract_features, game_phase, FEATURE_NAMES, NUM_FEATURES};
pub use model::{
    Activation, DifficultyLabel, LinearModel, MlpLayer, MlpModel, Model, ModelError, TrainingInfo,
    LINEAR_MODEL_VERSION, MLP_MODEL_VERSION,
};

/// Below this many training positions the model is considered undertrained
/// and the blend returns the heuristic score untouched.
pub const MIN_TRAINING_SAMPLES: u64 = 1500;

/// Model outputs live in [-1, 1]; this scale puts them on the same footing
/// as the heuristic's material-based range before blending.
pub const MODEL_SCORE_SCALE: f64 = 5200.0;

/// Immutable, cheaply cloneable handle to a validated model.
///
/// Loaded once at startup and passed into the search configuration; tests
/// construct their own handles instead of mutating any global state. Safe to
/// share across concurrent games.
#[derive(Clone, Debug)]
pub struct ModelHandle {
    model: Arc<Model>,
}

impl Default for ModelHandle {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl ModelHandle {
    /// A handle to the zero model: evaluates to 0 and is gated out of the
    /// blend by its empty training record.
    pub fn zeroed() -> Self {
        ModelHandle {
            model: Arc::new(Model::zeroed()),
        }
    }

    pub fn from_model(model: Model) -> Self {
        ModelHandle {
            model: Arc::new(model),
        }
    }

    /// Parses an artifact, surfacing validation failures to the caller.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        Model::from_json_str(raw).map(Self::from_model)
    }

    /// Loads an artifact from disk. Never fails: a missing or rejected
    /// artifact is logged as a configuration issue and the zero model is
    /// used instead.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to read model {}: {}, using zero model", path.display(), err);
                return Self::zeroed();
            }
        };
        match Model::from_json_str(&raw) {
            Ok(model) => {
                info!(
                    "loaded {} model from {} ({} samples)",
                    if model.is_mlp() { "mlp" } else { "linear" },
                    path.display(),
                    model.training().position_samples,
                );
                Self::from_model(model)
            }
            Err(err) => {
                warn!("rejected model {}: {}, using zero model", path.display(), err);
                Self::zeroed()
            }
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Raw model score for a position, in [-1, 1].
    pub fn score(&self, state: &GameState, perspective: TeamColor) -> f64 {
        let features = extract_features(state, perspective);
        self.model.evaluate(&features)
    }

    /// Blends the heuristic score with the model score. The blend weight
    /// grows with the artifact's training sample count and is capped; below
    /// `MIN_TRAINING_SAMPLES` the heuristic is returned unchanged.
    pub fn blend(&self, state: &GameState, perspective: TeamColor, heuristic: f64) -> f64 {
        let samples = self.model.training().position_samples;
        if samples < MIN_TRAINING_SAMPLES {
            return heuristic;
        }

        let model_score = self.score(state, perspective) * MODEL_SCORE_SCALE;
        let base = (0.25 + ((samples as f64 + 10.0).log10()) * 0.07).min(0.55);
        let weight = if self.model.is_mlp() {
            (base + 0.08).min(0.68)
        } else {
            base
        };

        heuristic * (1.0 - weight) + model_score * weight
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
