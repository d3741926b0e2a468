use super::*;
use serde_json::json;
use stratego_core::{GameState, GameStatus, Piece, PieceId, Rank, TeamColor};

fn piece(id: u16, rank: Rank, row: u8, col: u8) -> Piece {
    Piece {
        id: PieceId(id),
        rank,
        row,
        col,
        revealed: false,
    }
}

/// A deliberately lopsided position so the model score is non-zero.
fn sample_state() -> GameState {
    GameState {
        status: GameStatus::Playing,
        current_turn: TeamColor::Red,
        turn_number: 10,
        red_pieces: vec![
            piece(0, Rank::Flag, 9, 0),
            piece(1, Rank::Marshal, 6, 4),
            piece(2, Rank::Scout, 5, 0),
        ],
        blue_pieces: vec![piece(0, Rank::Flag, 0, 9), piece(1, Rank::Spy, 3, 4)],
        red_captured: Vec::new(),
        blue_captured: Vec::new(),
        move_history: Vec::new(),
        winner: None,
        win_reason: None,
    }
}

fn linear_handle(samples: u64, weight: f64) -> ModelHandle {
    let mut weights = vec![0.0; NUM_FEATURES];
    weights[12] = weight; // material balance
    let doc = json!({
        "version": 1,
        "kind": "linear",
        "featureNames": json!(FEATURE_NAMES),
        "weights": weights,
        "bias": 0.0,
        "training": {
            "generatedAt": "2024-06-01T00:00:00.000Z",
            "games": 100,
            "positionSamples": samples,
            "epochs": 5,
            "difficulty": "hard",
        },
    });
    ModelHandle::parse(&doc.to_string()).expect("valid handle")
}

#[test]
fn test_blend_is_gated_below_the_sample_threshold() {
    let state = sample_state();
    let handle = linear_handle(MIN_TRAINING_SAMPLES - 1, 2.0);

    let heuristic = 1234.5;
    assert_eq!(
        handle.blend(&state, TeamColor::Red, heuristic),
        heuristic,
        "an undertrained model must not move the score at all"
    );
}

#[test]
fn test_blend_mixes_once_trained() {
    let state = sample_state();
    let handle = linear_handle(5000, 2.0);

    let heuristic = 1000.0;
    let blended = handle.blend(&state, TeamColor::Red, heuristic);
    assert_ne!(blended, heuristic);

    // Recompute the documented formula.
    let model_score = handle.score(&state, TeamColor::Red) * MODEL_SCORE_SCALE;
    let weight = (0.25 + (5010.0_f64).log10() * 0.07).min(0.55);
    let expected = heuristic * (1.0 - weight) + model_score * weight;
    assert!((blended - expected).abs() < 1e-9);
}

#[test]
fn test_mlp_blend_weight_is_boosted_and_capped() {
    let mut weights = vec![0.0; NUM_FEATURES];
    weights[12] = 1.0;
    let doc = json!({
        "version": 2,
        "kind": "mlp",
        "featureNames": json!(FEATURE_NAMES),
        "layers": [{
            "inputSize": NUM_FEATURES,
            "outputSize": 1,
            "weights": weights,
            "bias": [0.0],
            "activation": "linear",
        }],
        "training": {
            "generatedAt": "2024-06-01T00:00:00.000Z",
            "games": 100,
            "positionSamples": 100_000_000u64,
            "epochs": 5,
            "difficulty": "mixed",
        },
    });
    let handle = ModelHandle::parse(&doc.to_string()).unwrap();

    let state = sample_state();
    let heuristic = 1000.0;
    let blended = handle.blend(&state, TeamColor::Red, heuristic);

    // Base weight saturates at 0.55; the MLP boost caps the total at 0.63.
    let model_score = handle.score(&state, TeamColor::Red) * MODEL_SCORE_SCALE;
    let expected = heuristic * (1.0 - 0.63) + model_score * 0.63;
    assert!((blended - expected).abs() < 1e-9);
}

#[test]
fn test_zeroed_handle_is_heuristic_only() {
    let state = sample_state();
    let handle = ModelHandle::zeroed();
    assert_eq!(handle.score(&state, TeamColor::Red), 0.0);
    assert_eq!(handle.blend(&state, TeamColor::Red, 777.0), 777.0);
}

#[test]
fn test_loading_a_missing_artifact_falls_back_to_the_zero_model() {
    let handle = ModelHandle::load(std::path::Path::new("/nonexistent/model.json"));
    assert_eq!(handle.model().training().position_samples, 0);
    assert!(!handle.model().is_mlp());
}

#[test]
fn test_model_score_tracks_material_sign() {
    let state = sample_state();
    let handle = linear_handle(5000, 2.0);

    // Red is far ahead on material, so a positive-weight model favors red.
    assert!(handle.score(&state, TeamColor::Red) > 0.0);
    assert!(handle.score(&state, TeamColor::Blue) < 0.0);
}
